//! Configuration System
//!
//! Loads the native client's configuration from a TOML file with
//! environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Users API endpoint configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL the `/users` paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_banner_timeout")]
    pub banner_timeout_secs: u64,
}

fn default_banner_timeout() -> u64 {
    crate::banner::BANNER_TIMEOUT.as_secs()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            banner_timeout_secs: default_banner_timeout(),
        }
    }
}

impl UiConfig {
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_secs(self.banner_timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Candidate config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("formsync").join("config.toml")),
            Some(PathBuf::from("./formsync.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// First candidate that exists on disk
    pub fn find_config(paths: &[PathBuf]) -> Option<PathBuf> {
        paths.iter().find(|path| path.exists()).cloned()
    }

    /// Load the first file found at a candidate location, or fall back to
    /// environment variables when there is none.
    ///
    /// A file that exists but fails to load is an error, not a fallback.
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match Self::find_config(paths) {
            Some(path) => Self::load_with_env(&path),
            None => Ok(Self::from_env()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("FORMSYNC_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("FORMSYNC_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = s;
            }
        }
        if let Some(level) = var("FORMSYNC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FORMSYNC_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Formsync Configuration
#
# Environment variables override these settings:
# - FORMSYNC_API_URL
# - FORMSYNC_TIMEOUT_SECS
# - FORMSYNC_LOG_LEVEL
# - FORMSYNC_LOG_FORMAT

[api]
# Base URL of the users API (the client appends /users)
base_url = "http://localhost:8000/api"

# Request timeout in seconds
request_timeout_secs = 30

[ui]
# How long an error banner stays visible (seconds)
banner_timeout_secs = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.banner_timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed = Config::parse(&generate_default_config(), Path::new("generated")).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://users.internal/api\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://users.internal/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/formsync.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = 1").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_broken_default_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("formsync.toml");
        std::fs::write(&broken, "[api\nbase_url = ").unwrap();
        let paths = vec![missing.clone(), broken.clone()];

        assert_eq!(Config::find_config(&paths), Some(broken));
        assert!(matches!(
            Config::load_first(&paths),
            Err(ConfigError::Parse { .. })
        ));

        // No file at all still means defaults
        let config = Config::load_first(&[missing]).unwrap();
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FORMSYNC_API_URL", "http://other:9000/api"),
            ("FORMSYNC_TIMEOUT_SECS", "not-a-number"),
            ("FORMSYNC_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://other:9000/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
