//! Configuration module for the Download Station client.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_SESSION_MAX_AGE_HOURS;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub timeouts: TimeoutConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Default NAS endpoint, used when no host is given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hostname or IP address of the NAS. `None` until the user logs in.
    pub host: Option<String>,
    /// API port (5001 is the stock HTTPS port).
    pub port: u16,
    /// Whether to connect over HTTPS.
    pub use_https: bool,
}

/// HTTP timeout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Seconds allowed for a regular API request.
    pub request_secs: u64,
    /// Seconds allowed for a file download (torrent payloads can be slow).
    pub download_secs: u64,
}

/// Session lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Hours before a stored session is considered stale and refreshed
    /// before use instead of on first failure.
    pub max_age_hours: i64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl TimeoutConfig {
    /// Request timeout as a [`Duration`]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    /// Download timeout as a [`Duration`]
    pub fn download(&self) -> Duration {
        Duration::from_secs(self.download_secs)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/dstation/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("dstation")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 5001,
            use_https: true,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            download_secs: 600,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_age_hours: DEFAULT_SESSION_MAX_AGE_HOURS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"timeouts.request_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ValidationError {
                field: "server.port".into(),
                message: "must be between 1 and 65535".into(),
            });
        }
        if self.timeouts.request_secs == 0 {
            errors.push(ValidationError {
                field: "timeouts.request_secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.timeouts.download_secs < self.timeouts.request_secs {
            errors.push(ValidationError {
                field: "timeouts.download_secs".into(),
                message: "must be at least timeouts.request_secs".into(),
            });
        }
        if self.session.max_age_hours <= 0 {
            errors.push(ValidationError {
                field: "session.max_age_hours".into(),
                message: "must be greater than 0".into(),
            });
        }
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!("must be one of {VALID_LOG_LEVELS:?}"),
            });
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
