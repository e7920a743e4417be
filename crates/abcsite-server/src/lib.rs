//! HTTP server for the ABC Player website.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - The rendered pages (`/`, `/index.php`, `/changelog.php`, `/contact.php`)
//! - Redirects for legacy URLs
//! - Static files (stylesheet, images, mp3 previews, release artifacts)
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use abcsite_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         root_dir: PathBuf::from("public"),
//!         ..Default::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (abcsite-server)
//!                        │
//!                        ├─► Page routes ──► Site::render (abcsite-render)
//!                        │                       ├─► SystemClock
//!                        │                       └─► FsArtifacts (root_dir)
//!                        │
//!                        ├─► Legacy redirects
//!                        │
//!                        └─► Static files (tower-http ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use abcsite_render::{FsArtifacts, PromoBanner, Release, Site, SiteConfig, SystemClock};
use chrono::{DateTime, Utc};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding static files and release artifacts.
    pub root_dir: PathBuf,
    /// Base URL used when a request carries no `Host` header.
    pub base_url: String,
    /// Current release version.
    pub release_version: String,
    /// Announcement banner cutoff.
    pub banner_until: Option<DateTime<Utc>>,
    /// PayPal hosted button id.
    pub donate_button_id: Option<String>,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            root_dir: PathBuf::from("public"),
            base_url: "http://127.0.0.1:7979".to_owned(),
            release_version: "1.3.0".to_owned(),
            banner_until: None,
            donate_button_id: None,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// Build the site this configuration describes.
    pub(crate) fn site(&self) -> Result<Site, abcsite_render::RenderError> {
        let site_config = SiteConfig {
            release: Release::for_version(self.release_version.clone()),
            banner: PromoBanner::new(self.banner_until),
            donate_button_id: self.donate_button_id.clone(),
        };
        Site::new(
            site_config,
            Arc::new(SystemClock),
            Arc::new(FsArtifacts::new(self.root_dir.clone())),
        )
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let site = config.site()?;

    let state = Arc::new(AppState {
        site,
        fallback_base_url: config.base_url.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state, &config.root_dir);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, root_dir = %config.root_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the site config file.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &abcsite_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root_dir: config.site_resolved.root_dir.clone(),
        base_url: config.site_resolved.base_url.clone(),
        release_version: config.release.version.clone(),
        banner_until: config.banner_until,
        donate_button_id: config.donate_button_id().map(str::to_owned),
        version,
    }
}
