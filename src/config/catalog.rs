//! Catalog service configuration.

use serde::Deserialize;
use std::time::Duration;

use super::ConfigValidationError;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ANSWER_TIMEOUT_SECS: u64 = 180;

/// Configuration for the remote advising catalog service.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    pub base_url: String,

    /// Timeout for catalog list requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound for the long-running answer lookup.
    #[serde(default = "default_answer_timeout_secs")]
    pub answer_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_answer_timeout_secs() -> u64 {
    DEFAULT_ANSWER_TIMEOUT_SECS
}

impl CatalogConfig {
    /// Creates a configuration with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            answer_timeout_secs: DEFAULT_ANSWER_TIMEOUT_SECS,
        }
    }

    /// Sets the list-request timeout.
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Sets the answer lookup timeout.
    pub fn with_answer_timeout(mut self, secs: u64) -> Self {
        self.answer_timeout_secs = secs;
        self
    }

    /// Timeout for catalog list requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Timeout for the answer lookup.
    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.answer_timeout_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigValidationError::new(
                "catalog.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::new(
                "catalog.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.answer_timeout_secs == 0 {
            return Err(ConfigValidationError::new(
                "catalog.answer_timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_bounds() {
        let config = CatalogConfig::new("http://advising.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.answer_timeout(), Duration::from_secs(180));
    }

    #[test]
    fn builder_overrides_timeouts() {
        let config = CatalogConfig::new("http://advising.example.com")
            .with_request_timeout(5)
            .with_answer_timeout(60);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.answer_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = CatalogConfig::new("ftp://advising.example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config = CatalogConfig::new("http://advising.example.com").with_answer_timeout(0);
        assert!(config.validate().is_err());

        let config = CatalogConfig::new("http://advising.example.com").with_request_timeout(0);
        assert!(config.validate().is_err());
    }
}
