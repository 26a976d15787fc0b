//! Utility modules for the rate limiter crate
//!
//! - **error**: Error type and `Result` alias shared by every module
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging

pub use error::{LimiterError, Result};
pub use logging::init_logging;

use std::time::Duration;

/// Format duration as human readable string
pub fn format_duration(duration: Duration) -> String {
    let duration_ms = duration.as_millis();
    if duration_ms < 1000 {
        format!("{}ms", duration_ms)
    } else if duration_ms < 60_000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if duration_ms < 3_600_000 {
        format!("{:.1}m", duration.as_secs_f64() / 60.0)
    } else {
        format!("{:.1}h", duration.as_secs_f64() / 3600.0)
    }
}

/// Duration expressed in fractional milliseconds, for reports
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
