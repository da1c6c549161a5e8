//! Configuration management for Consentry.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/consentry/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Scan orchestration settings
    pub scanning: ScanningConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Scan history storage settings
    pub history: HistoryConfig,
    /// Upstream search provider settings
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `CONSENTRY_PORT`: Override the HTTP listen port
    /// - `CONSENTRY_HEADLESS`: Override browser headless mode (true/false)
    /// - `CONSENTRY_HISTORY_DIR`: Override the history storage directory
    /// - `CONSENTRY_SERPAPI_KEY`: Set the search provider API key
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("CONSENTRY_PORT") {
            if let Ok(port) = val.parse() {
                config.server.port = port;
                tracing::debug!("Override server.port from env: {}", port);
            }
        }

        if let Ok(val) = std::env::var("CONSENTRY_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("CONSENTRY_HISTORY_DIR") {
            config.history.dir = Some(PathBuf::from(&val));
            tracing::debug!("Override history.dir from env: {}", val);
        }

        if let Ok(val) = std::env::var("CONSENTRY_SERPAPI_KEY") {
            config.search.api_key = Some(val);
            tracing::debug!("Override search.api_key from env");
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/consentry/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "consentry", "consentry").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/consentry`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "consentry", "consentry").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the history storage directory.
    ///
    /// Uses the configured directory when set, otherwise `{data_dir}/history`.
    pub fn history_dir(&self) -> ConfigResult<PathBuf> {
        match &self.history.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("history")),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub bind_addr: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Scan orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Number of concurrent page renders (1 = strictly sequential)
    pub max_concurrent_scans: usize,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            max_concurrent_scans: 1,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Bounded wait for the document load event, in seconds
    pub load_timeout_secs: u64,
    /// Bounded wait for meta-description resolution, in seconds
    pub meta_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_secs: 20,
            load_timeout_secs: 10,
            meta_timeout_secs: 5,
        }
    }
}

/// Scan history storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Storage directory for session records (defaults to `{data_dir}/history`)
    pub dir: Option<PathBuf>,
}

/// Upstream search provider settings (SerpAPI).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// SerpAPI key (set via `CONSENTRY_SERPAPI_KEY`, never written to disk)
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Search engine identifier
    pub engine: String,
    /// Number of results to request
    pub num_results: u32,
    /// Country code for localized results
    pub country: String,
    /// Interface language
    pub language: String,
    /// Google domain to query
    pub google_domain: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            engine: "google".to_string(),
            num_results: 50,
            country: "fr".to_string(),
            language: "fr".to_string(),
            google_domain: "google.fr".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scanning.max_concurrent_scans, 1);
        assert!(config.browser.headless);
        assert_eq!(config.browser.navigation_timeout_secs, 20);
        assert_eq!(config.history.dir, None);
        assert_eq!(config.search.engine, "google");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[scanning]"));
        assert!(toml_str.contains("[browser]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.server.port, config.server.port);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.server.port = 8080;
        config.browser.headless = false;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded_contents = fs::read_to_string(&config_path).expect("read config file");
        let loaded: AppConfig = toml::from_str(&loaded_contents).expect("parse loaded config");

        assert_eq!(loaded.server.port, 8080);
        assert!(!loaded.browser.headless);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = AppConfig::default();
        config.search.api_key = Some("secret".to_string());

        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        assert!(!toml_str.contains("secret"));
    }

    #[test]
    fn test_partial_config() {
        // Partial TOML configs fill the rest with defaults
        let toml_str = r#"
[server]
port = 9000

[browser]
headless = false
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.server.port, 9000);
        assert!(!config.browser.headless);
        assert_eq!(config.scanning.max_concurrent_scans, 1);
        assert_eq!(config.browser.navigation_timeout_secs, 20);
    }

    #[test]
    fn test_history_dir_override() {
        let mut config = AppConfig::default();
        config.history.dir = Some(PathBuf::from("/tmp/consentry-history"));
        let dir = config.history_dir().expect("resolve history dir");
        assert_eq!(dir, PathBuf::from("/tmp/consentry-history"));
    }
}
