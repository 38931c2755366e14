//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `config` crate failed to build or deserialize the sources.
    #[error("configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),
}

/// A semantically invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {field} {reason}")]
pub struct ConfigValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ConfigValidationError {
    /// Creates a validation error for a field.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
