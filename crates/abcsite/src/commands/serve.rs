//! `abcsite serve` command implementation.

use std::path::PathBuf;

use abcsite_config::{CliSettings, Config};
use abcsite_server::{run_server, server_config_from_config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover abcsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory with static files and release artifacts (overrides config).
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root_dir: self.root_dir,
            base_url: None,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Site root: {}",
            config.site_resolved.root_dir.display()
        ));
        output.info(&format!("Release: {}", config.release.version));

        if let Some(until) = config.banner_until {
            output.info(&format!("Release banner until: {until}"));
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
