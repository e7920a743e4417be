//! `abcsite build` command implementation.
//!
//! Renders every page to `<output>/<route file name>` as of the current time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use abcsite_config::{CliSettings, Config};
use abcsite_render::{
    FsArtifacts, PromoBanner, Release, Route, Site, SiteConfig, SystemClock,
};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover abcsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory with release artifacts (overrides config).
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Public base URL of the site (overrides config).
    #[arg(long, env = "ABCSITE_BASE_URL")]
    base_url: Option<String>,

    /// Output directory for rendered pages.
    #[arg(short, long, default_value = "dist")]
    output: PathBuf,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a page fails to render,
    /// or an output file can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root_dir: self.root_dir,
            base_url: self.base_url,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let site = site_from_config(&config)?;
        let written = render_site(&site, &config.site_resolved.base_url, &self.output)?;

        output.success(&format!(
            "Rendered {} pages to {}",
            written.len(),
            self.output.display()
        ));
        Ok(())
    }
}

/// Build the site described by `config`.
fn site_from_config(config: &Config) -> Result<Site, CliError> {
    let site_config = SiteConfig {
        release: Release::for_version(config.release.version.clone()),
        banner: PromoBanner::new(config.banner_until),
        donate_button_id: config.donate_button_id().map(str::to_owned),
    };
    Ok(Site::new(
        site_config,
        Arc::new(SystemClock),
        Arc::new(FsArtifacts::new(config.site_resolved.root_dir.clone())),
    )?)
}

/// Render every route into `output_dir`, returning the written paths.
fn render_site(site: &Site, base_url: &str, output_dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(Route::ALL.len());
    for route in Route::ALL {
        let html = site.render(route, base_url)?;
        let path = output_dir.join(route.file_name());
        std::fs::write(&path, html)?;
        tracing::info!(path = %path.display(), "Wrote page");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use abcsite_render::FixedClock;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_site_writes_every_page() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let site = Site::new(
            SiteConfig::for_version("1.3.0"),
            Arc::new(FixedClock(abcsite_render::parse_cutoff("2013-08-01T00:00:00").unwrap())),
            Arc::new(FsArtifacts::new(root.path())),
        )
        .unwrap();

        let written = render_site(&site, "http://abc.example.org", out.path()).unwrap();

        assert_eq!(written.len(), 3);
        for route in Route::ALL {
            let html = std::fs::read_to_string(out.path().join(route.file_name())).unwrap();
            assert!(html.contains("http://abc.example.org/mp3/player.swf"));
        }
    }

    #[test]
    fn test_site_from_config_uses_release_version() {
        let mut config = Config::default();
        config.release.version = "2.0.0".to_owned();

        let site = site_from_config(&config).unwrap();

        assert_eq!(site.config().release.version, "2.0.0");
        assert_eq!(
            site.config().release.installer_path,
            "installer/AbcPlayer_2.0.0.msi"
        );
    }
}
