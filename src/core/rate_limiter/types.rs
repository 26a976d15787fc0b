//! Rate limiter types and data structures

use std::time::Duration;

/// Outcome of an acquire attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireResult {
    /// The permits were granted
    Acquired {
        /// Number of permits granted
        permits: u64,
    },
    /// The permits were refused
    Rejected {
        /// Minimal delay after which a retry MAY succeed
        retry_after: Duration,
    },
}

impl AcquireResult {
    /// Whether the permits were granted
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired { .. })
    }

    /// Retry hint. Always zero for an acquired result.
    pub fn retry_after(&self) -> Duration {
        match self {
            Self::Acquired { .. } => Duration::ZERO,
            Self::Rejected { retry_after } => *retry_after,
        }
    }
}
