//! Error handling for the rate limiter
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, LimiterError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum LimiterError {
    /// A limiter was constructed with non-positive or inconsistent parameters
    #[error("Invalid limiter parameters: {0}")]
    InvalidParameters(String),

    /// Zero permits were requested
    #[error("Permits must be positive")]
    NonPositivePermits,

    /// More permits were requested than the limiter can ever grant at once
    #[error("Permits exceed {limit_kind}: requested {requested}, limit {limit}")]
    PermitsExceedLimit {
        /// What the limit is called for this algorithm
        limit_kind: &'static str,
        /// Requested permits
        requested: u64,
        /// Largest grantable request
        limit: u64,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LimiterError {
    /// Create an invalid parameters error
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error was caused by the caller's permit request rather
    /// than by the limiter's setup
    pub fn is_permit_error(&self) -> bool {
        matches!(
            self,
            Self::NonPositivePermits | Self::PermitsExceedLimit { .. }
        )
    }
}
