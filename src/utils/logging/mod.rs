//! Logging utilities
//!
//! Installs the global `tracing` subscriber used by the demo binary. Logs go
//! to stderr so that reports on stdout stay readable.

use crate::config::LoggingConfig;
use crate::utils::error::{LimiterError, Result};
use tracing_subscriber::EnvFilter;

/// Build the level filter. `RUST_LOG` wins over the configured level.
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.level),
    }
}

/// Parse a filter directive such as `info` or `rate_limiter_rs=debug,warn`
pub fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        LimiterError::config(format!("Invalid log filter '{}': {}", directives, e))
    })
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| LimiterError::config(format!("Failed to initialize logging: {}", e)))
}
