//! Common contract implemented by every limiter algorithm

use super::clock::Clock;
use super::types::AcquireResult;
use crate::utils::error::Result;
use std::fmt;
use std::time::Duration;

/// Rate limiter contract.
///
/// Every operation takes `&self` and is atomic with respect to the limiter's
/// state, so a limiter can be shared between threads behind an `Arc`.
///
/// The `*_at` methods take an explicit clock reading in nanoseconds; the
/// plain methods read the limiter's own clock.
pub trait RateLimiter: Send + Sync + fmt::Debug {
    /// Algorithm name, for logs and reports
    fn name(&self) -> &'static str;

    /// Largest number of permits a single request may ask for
    fn capacity(&self) -> u64;

    /// The clock used by the convenience methods
    fn clock(&self) -> &dyn Clock;

    /// Atomically acquire `permits` at `now_nanos`, or reject with a retry hint.
    ///
    /// # Errors
    ///
    /// Returns `LimiterError::NonPositivePermits` for zero permits and
    /// `LimiterError::PermitsExceedLimit` when `permits > capacity()`.
    fn try_acquire_at(&self, now_nanos: i64, permits: u64) -> Result<AcquireResult>;

    /// Permits that could be acquired at `now_nanos`, within `[0, capacity()]`
    fn available_tokens_at(&self, now_nanos: i64) -> u64;

    /// Minimal delay after which acquiring `permits` MAY succeed.
    ///
    /// A zero delay means `try_acquire_at(now_nanos, permits)` succeeds.
    fn retry_after_at(&self, now_nanos: i64, permits: u64) -> Result<Duration>;

    /// Acquire `permits` now
    fn try_acquire(&self, permits: u64) -> Result<AcquireResult> {
        self.try_acquire_at(self.clock().now_nanos(), permits)
    }

    /// Permits that could be acquired now
    fn available_tokens(&self) -> u64 {
        self.available_tokens_at(self.clock().now_nanos())
    }

    /// Delay before acquiring `permits` may succeed, measured from now
    fn retry_after(&self, permits: u64) -> Result<Duration> {
        self.retry_after_at(self.clock().now_nanos(), permits)
    }
}
