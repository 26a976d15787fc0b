//! Configuration data models
//!
//! This module defines all configuration structures used by the library and the demo.

pub mod demo;
pub mod logging;
pub mod rate_limit;

// Re-export all configuration types
pub use demo::*;
pub use logging::*;
pub use rate_limit::*;

/// Default for flags that are on unless switched off
pub fn default_true() -> bool {
    true
}

/// Default bucket capacity / burst / permits per window
pub fn default_capacity() -> u64 {
    10
}

/// Default tokens added per refill
pub fn default_refill_tokens() -> u64 {
    1
}

/// Default burst demo attempts
pub fn default_burst_attempts() -> u32 {
    50
}

/// Default steady demo rate
pub fn default_qps() -> u32 {
    50
}

/// Default steady demo length in seconds
pub fn default_duration_secs() -> u64 {
    5
}

/// Default permits per demo attempt
pub fn default_permits() -> u64 {
    1
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}
