//! Server configuration
//!
//! Describes how to reach one NAS appliance: host, port, and whether to use
//! HTTPS. The derived base URL is the prefix every API endpoint is appended
//! to.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::errors::DsError;

/// Connection parameters for a single NAS server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfiguration {
    /// Hostname or IP address, without scheme
    pub host: String,
    /// TCP port, 1..=65535
    pub port: u16,
    /// Whether to connect over HTTPS
    pub use_https: bool,
}

impl ServerConfiguration {
    /// Creates a validated server configuration.
    ///
    /// # Errors
    /// Returns `DsError::InvalidServerConfiguration` if the host is empty,
    /// contains a scheme or path, or the port is 0.
    pub fn new(host: impl Into<String>, port: u16, use_https: bool) -> Result<Self, DsError> {
        let config = Self {
            host: host.into(),
            port,
            use_https,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the invariants: non-empty bare host, port in range.
    pub fn validate(&self) -> Result<(), DsError> {
        if self.host.trim().is_empty() {
            return Err(DsError::InvalidServerConfiguration(
                "Host must not be empty".to_string(),
            ));
        }
        if self.host.contains("://") || self.host.contains('/') {
            return Err(DsError::InvalidServerConfiguration(format!(
                "Host must be a bare hostname or IP, got '{}'",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(DsError::InvalidServerConfiguration(
                "Port must be between 1 and 65535".to_string(),
            ));
        }
        Ok(())
    }

    /// URL scheme derived from the HTTPS flag
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.use_https {
            "https"
        } else {
            "http"
        }
    }

    /// Base URL for API requests, with a trailing slash
    ///
    /// Example: `https://192.168.1.100:5001/`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.scheme(), self.host, self.port)
    }
}

impl Display for ServerConfiguration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme(), self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_configuration() {
        let config = ServerConfiguration::new("192.168.1.100", 5001, true).unwrap();
        assert_eq!(config.scheme(), "https");
        assert_eq!(config.base_url(), "https://192.168.1.100:5001/");
    }

    #[test]
    fn test_http_scheme() {
        let config = ServerConfiguration::new("nas.local", 5000, false).unwrap();
        assert_eq!(config.scheme(), "http");
        assert_eq!(config.base_url(), "http://nas.local:5000/");
    }

    #[test]
    fn test_empty_host_fails() {
        assert!(ServerConfiguration::new("", 5000, false).is_err());
        assert!(ServerConfiguration::new("   ", 5000, false).is_err());
    }

    #[test]
    fn test_host_with_scheme_fails() {
        assert!(ServerConfiguration::new("https://nas.local", 5001, true).is_err());
        assert!(ServerConfiguration::new("nas.local/webapi", 5001, true).is_err());
    }

    #[test]
    fn test_port_zero_fails() {
        let result = ServerConfiguration::new("nas.local", 0, false);
        assert!(matches!(
            result,
            Err(DsError::InvalidServerConfiguration(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ServerConfiguration::new("nas.local", 5001, true).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ServerConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
