//! Utility functions for rate limiter arithmetic
//!
//! Timestamps are signed nanosecond readings; every helper here saturates
//! rather than overflowing.

use crate::utils::error::{LimiterError, Result};
use std::time::Duration;

/// Convert a duration to nanoseconds, saturating at `i64::MAX`
pub(crate) fn duration_to_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

/// Convert a non-negative nanosecond delta to a duration. Negative deltas become zero.
pub(crate) fn nanos_to_duration(nanos: i64) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(0))
}

/// Convert a permit count to the signed domain used for time arithmetic
pub(super) fn count_to_i64(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Convert a strictly positive duration parameter to nanoseconds
pub(super) fn positive_nanos(duration: Duration, what: &str) -> Result<i64> {
    let nanos = duration_to_nanos(duration);
    if nanos <= 0 {
        return Err(LimiterError::invalid_parameters(format!(
            "{} must be positive",
            what
        )));
    }
    Ok(nanos)
}

/// Reject zero permits and permits above the limiter's largest grantable request
pub(super) fn validate_permits(permits: u64, limit: u64, limit_kind: &'static str) -> Result<()> {
    if permits == 0 {
        return Err(LimiterError::NonPositivePermits);
    }
    if permits > limit {
        return Err(LimiterError::PermitsExceedLimit {
            limit_kind,
            requested: permits,
            limit,
        });
    }
    Ok(())
}
