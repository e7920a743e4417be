//! Configuration management for the ABC Player website.
//!
//! Parses `abcsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.base_url`
//! - `donate.button_id`

mod expand;

use std::path::{Path, PathBuf};

use abcsite_render::{CUTOFF_FORMAT, parse_cutoff};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override site root directory.
    pub root_dir: Option<PathBuf>,
    /// Override public base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "abcsite.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Release configuration.
    pub release: ReleaseConfig,
    /// Donate button configuration (optional section).
    pub donate: Option<DonateConfig>,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Parsed banner cutoff (set after loading).
    #[serde(skip)]
    pub banner_until: Option<DateTime<Utc>>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl ServerConfig {
    /// Base URL of the bind address, used when `site.base_url` is unset.
    fn default_base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root_dir: Option<String>,
    base_url: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory holding static files and release artifacts.
    pub root_dir: PathBuf,
    /// Public base URL used when rendering outside a request.
    pub base_url: String,
}

/// Release configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Current version.
    pub version: String,
    /// Announcement banner cutoff, `YYYY-MM-DDTHH:MM:SS` in UTC.
    pub banner_until: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            version: "1.3.0".to_owned(),
            banner_until: None,
        }
    }
}

/// PayPal donate button configuration.
#[derive(Debug, Deserialize)]
pub struct DonateConfig {
    /// Hosted button id.
    pub button_id: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`PUBLIC_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `abcsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Donate button id, if the `[donate]` section is present.
    #[must_use]
    pub fn donate_button_id(&self) -> Option<&str> {
        self.donate.as_ref().map(|d| d.button_id.as_str())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root_dir) = &settings.root_dir {
            self.site_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site_resolved.base_url.clone_from(base_url);
        } else if self.site.base_url.is_none() {
            self.site_resolved.base_url = self.server.default_base_url();
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let server = ServerConfig::default();
        let base_url = server.default_base_url();
        Self {
            server,
            site: SiteConfigRaw::default(),
            release: ReleaseConfig::default(),
            donate: None,
            site_resolved: SiteConfig {
                root_dir: base.join("public"),
                base_url,
            },
            banner_until: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        require_non_empty(&self.release.version, "release.version")?;
        if let Some(donate) = &self.donate {
            require_non_empty(&donate.button_id, "donate.button_id")?;
        }
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.base_url, "site.base_url")?;
        require_http_url(&self.site_resolved.base_url, "site.base_url")
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref url) = self.site.base_url {
            self.site.base_url = Some(expand::expand_env(url, "site.base_url")?);
        }

        if let Some(ref mut donate) = self.donate {
            donate.button_id = expand::expand_env(&donate.button_id, "donate.button_id")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and parse the
    /// banner cutoff.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let base_url = self
            .site
            .base_url
            .clone()
            .unwrap_or_else(|| self.server.default_base_url());

        self.site_resolved = SiteConfig {
            root_dir: config_dir.join(self.site.root_dir.as_deref().unwrap_or("public")),
            base_url,
        };

        self.banner_until = self
            .release
            .banner_until
            .as_deref()
            .map(|value| {
                parse_cutoff(value).map_err(|e| {
                    ConfigError::Validation(format!(
                        "release.banner_until must match {CUTOFF_FORMAT}: {e}"
                    ))
                })
            })
            .transpose()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/test/public"));
        assert_eq!(config.site_resolved.base_url, "http://127.0.0.1:7979");
        assert_eq!(config.release.version, "1.3.0");
        assert!(config.banner_until.is_none());
        assert!(config.donate_button_id().is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[site]
root_dir = "www"
base_url = "https://abcplayer.example.org"

[release]
version = "1.3.0"
banner_until = "2013-08-15T00:00:00"

[donate]
button_id = "KPX5YZW5SALAG"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/project/www"));
        assert_eq!(config.site_resolved.base_url, "https://abcplayer.example.org");
        assert_eq!(
            config.banner_until.unwrap().to_rfc3339(),
            "2013-08-15T00:00:00+00:00"
        );
        assert_eq!(config.donate_button_id(), Some("KPX5YZW5SALAG"));
    }

    #[test]
    fn test_base_url_defaults_to_server_address() {
        let toml = r#"
[server]
port = 8080
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();
        assert_eq!(config.site_resolved.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_banner_until() {
        let toml = r#"
[release]
banner_until = "August 15, 2013"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("release.banner_until"));
        assert!(err.to_string().contains(CUTOFF_FORMAT));
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.base_url = "ftp://example.com".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.base_url"));
    }

    #[test]
    fn test_validate_rejects_empty_version() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.release.version = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_button_id() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.donate = Some(DonateConfig {
            button_id: String::new(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("donate.button_id"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            root_dir: Some(PathBuf::from("/srv/www")),
            base_url: Some("https://abc.example.org".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site_resolved.root_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.site_resolved.base_url, "https://abc.example.org");
    }

    #[test]
    fn test_cli_address_override_updates_default_base_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.base_url, "http://0.0.0.0:9000");
    }

    #[test]
    fn test_cli_address_override_keeps_explicit_base_url() {
        let toml = r#"
[site]
base_url = "https://abcplayer.example.org"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();
        let overrides = CliSettings {
            port: Some(9000),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site_resolved.base_url, "https://abcplayer.example.org");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, before.server.host);
        assert_eq!(config.server.port, before.server.port);
        assert_eq!(config.site_resolved.root_dir, before.site_resolved.root_dir);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/abcsite.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
root_dir = "htdocs"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.root_dir, dir.path().join("htdocs"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_expand_env_vars_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ABCSITE_TEST_PUBLIC_HOST", "abc.example.org");
        }

        let toml = r#"
[site]
base_url = "https://${ABCSITE_TEST_PUBLIC_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://abc.example.org")
        );

        unsafe {
            std::env::remove_var("ABCSITE_TEST_PUBLIC_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ABCSITE_MISSING_BUTTON");
        }

        let toml = r#"
[donate]
button_id = "${ABCSITE_MISSING_BUTTON}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("donate.button_id"));
    }
}
