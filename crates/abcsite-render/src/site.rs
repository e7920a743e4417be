//! Site-wide rendering entry point.
//!
//! [`Site`] owns the immutable configuration and the injected collaborators
//! (clock, artifact sizes) and renders any [`Route`] to a full document.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use abcsite_render::{FsArtifacts, Route, Site, SiteConfig, SystemClock};
//!
//! let site = Site::new(
//!     SiteConfig::for_version("1.3.0"),
//!     Arc::new(SystemClock),
//!     Arc::new(FsArtifacts::new("public")),
//! )
//! .unwrap();
//!
//! let html = site.render(Route::Home, "http://localhost:7979").unwrap();
//! assert!(html.contains("ABC Player v1.3.0"));
//! ```

use std::sync::Arc;

use crate::banner::PromoBanner;
use crate::clock::Clock;
use crate::layout::{Layout, LayoutError, Page};
use crate::pages::{self, HomeContent, Route};
use crate::release::{ArtifactSizes, Release};
use crate::release_notes::ReleaseNotes;

/// Error returned when a site can't be built or a page can't be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Page construction failed.
    #[error("{0}")]
    Layout(#[from] LayoutError),
    /// Bundled release history is malformed.
    #[error("Release notes parse error: {0}")]
    ReleaseNotes(#[from] toml::de::Error),
    /// Release history has no entries.
    #[error("Release history is empty")]
    EmptyReleaseHistory,
}

/// Immutable site settings.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Current release.
    pub release: Release,
    /// Release announcement on the home page.
    pub banner: PromoBanner,
    /// PayPal hosted button id (`None` hides the donate button).
    pub donate_button_id: Option<String>,
}

impl SiteConfig {
    /// Settings for `version` with no banner and no donate button.
    #[must_use]
    pub fn for_version(version: impl Into<String>) -> Self {
        Self {
            release: Release::for_version(version),
            banner: PromoBanner::default(),
            donate_button_id: None,
        }
    }
}

/// The website.
pub struct Site {
    config: SiteConfig,
    clock: Arc<dyn Clock>,
    artifacts: Arc<dyn ArtifactSizes>,
    release_notes: Vec<ReleaseNotes>,
}

impl Site {
    /// Create a site with the bundled release history.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ReleaseNotes` if the bundled history is malformed
    /// and `RenderError::EmptyReleaseHistory` if it has no entries.
    pub fn new(
        config: SiteConfig,
        clock: Arc<dyn Clock>,
        artifacts: Arc<dyn ArtifactSizes>,
    ) -> Result<Self, RenderError> {
        let release_notes = ReleaseNotes::bundled()?;
        Self::with_release_notes(config, clock, artifacts, release_notes)
    }

    /// Create a site with an explicit release history.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::EmptyReleaseHistory` if `release_notes` is empty.
    pub fn with_release_notes(
        config: SiteConfig,
        clock: Arc<dyn Clock>,
        artifacts: Arc<dyn ArtifactSizes>,
        release_notes: Vec<ReleaseNotes>,
    ) -> Result<Self, RenderError> {
        if release_notes.is_empty() {
            return Err(RenderError::EmptyReleaseHistory);
        }
        Ok(Self {
            config,
            clock,
            artifacts,
            release_notes,
        })
    }

    /// Site settings.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Build the page for `route` as of the current clock reading.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Layout` if the page content is invalid.
    pub fn page(&self, route: Route, base_url: &str) -> Result<Page, RenderError> {
        let page = match route {
            Route::Home => {
                let release = &self.config.release;
                let downloads = release.downloads(self.artifacts.as_ref());
                let show_banner = self.config.banner.is_visible(self.clock.now());
                pages::home(&HomeContent {
                    version: &release.version,
                    downloads: &downloads,
                    show_banner,
                    base_url,
                })?
            }
            Route::Changelog => pages::changelog(&self.release_notes)?,
            Route::Contact => pages::contact()?,
        };
        Ok(page)
    }

    /// Render `route` to a complete HTML document.
    ///
    /// `base_url` is the absolute site root URL for the embedded audio player.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Layout` if the page content is invalid.
    pub fn render(&self, route: Route, base_url: &str) -> Result<String, RenderError> {
        let layout = Layout::new(base_url, self.config.donate_button_id.clone());
        let page = self.page(route, layout.base_url())?;
        tracing::debug!(route = route.file_name(), "Rendering page");
        Ok(layout.render(&page))
    }
}
