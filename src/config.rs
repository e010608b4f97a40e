// ABOUTME: Application configuration loaded from a TOML file with CLI overrides applied on top

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8010";
pub const DEFAULT_DISPLAY_URL: &str = "http://localhost:6080/vnc.html?autoconnect=true";
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the server exposing `/computer_use/api/*`.
    pub api_base_url: String,
    /// noVNC page shown in place of the VM screen while it runs.
    pub display_url: String,
    pub refresh_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            display_url: DEFAULT_DISPLAY_URL.to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "computer-use-viewer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the platform config directory, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        for (field, value) in [("api_base_url", &self.api_base_url), ("display_url", &self.display_url)] {
            reqwest::Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{field} '{value}': {e}")))?;
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.refresh_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://10.0.0.5:8010\"").unwrap();
        writeln!(file, "refresh_interval_ms = 500").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:8010");
        assert_eq!(config.refresh_interval_ms, 500);
        assert_eq!(config.display_url, DEFAULT_DISPLAY_URL);
    }

    #[test]
    fn test_zero_refresh_interval_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval_ms = 0").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let config = AppConfig {
            display_url: "vnc.html".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval_ms = \"soon\"").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
