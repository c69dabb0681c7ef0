//! Console configuration: structs, YAML parsing, and validation.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("invalid config value for {field}: {message}")]
    Validation { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Text,
}

// ── Sections ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the dashboard backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Alert view poll interval, seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Search input quiet window, milliseconds.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Toast display time, milliseconds.
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            search_debounce_ms: default_search_debounce_ms(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_toast_duration_ms() -> u64 {
    3_000
}

impl ConsoleConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "backend.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation {
                field: "backend.base_url".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "backend.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.ui.poll_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "ui.poll_interval_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ConsoleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.ui.poll_interval_secs, 30);
        assert_eq!(config.ui.search_debounce_ms, 300);
        assert_eq!(config.ui.toast_duration_ms, 3_000);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config = ConsoleConfig::from_yaml("backend:\n  base_url: http://10.0.0.2:5000\n").unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.ui.poll_interval_secs, 30);
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = ConsoleConfig::from_yaml("backend:\n  base_url: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend.base_url"));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ConsoleConfig::from_yaml("backend:\n  base_url: ftp://x\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let err = ConsoleConfig::from_yaml("ui:\n  poll_interval_secs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "ui.poll_interval_secs"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(ConsoleConfig::from_yaml("surprise: true\n").is_err());
        assert!(ConsoleConfig::from_yaml("ui:\n  theme: dark\n").is_err());
    }

    #[test]
    fn log_level_strings_are_valid_filters() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(!level.as_str().is_empty());
        }
    }
}
