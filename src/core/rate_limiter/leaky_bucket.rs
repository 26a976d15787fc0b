//! Leaky bucket as a meter: permits are spaced `interval` apart, with up to
//! `max_burst` permits scheduled ahead of the current time.

use super::clock::{Clock, MonotonicClock};
use super::limiter::RateLimiter;
use super::types::AcquireResult;
use super::utils::{count_to_i64, nanos_to_duration, positive_nanos, validate_permits};
use crate::utils::error::{LimiterError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Spacing leaky bucket
#[derive(Debug)]
pub struct SpacingLeakyBucket {
    max_burst: u64,
    interval_nanos: i64,
    /// Earliest instant at which the schedule is free again.
    /// `None` until the first acquire, which behaves as if it were `now`.
    next_free: Mutex<Option<i64>>,
    clock: Arc<dyn Clock>,
}

impl SpacingLeakyBucket {
    /// Create a new spacing bucket
    ///
    /// # Errors
    ///
    /// Returns `LimiterError::InvalidParameters` if `max_burst` or `interval` is zero.
    pub fn new(max_burst: u64, interval: Duration) -> Result<Self> {
        if max_burst == 0 {
            return Err(LimiterError::invalid_parameters(
                "Max burst, rate interval must be positive",
            ));
        }
        let interval_nanos = positive_nanos(interval, "Rate interval")?;

        Ok(Self {
            max_burst,
            interval_nanos,
            next_free: Mutex::new(None),
            clock: Arc::new(MonotonicClock),
        })
    }

    /// Replace the clock used by the convenience methods
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn span(&self, permits: u64) -> i64 {
        count_to_i64(permits).saturating_mul(self.interval_nanos)
    }

    fn retry_after_nanos(&self, next_free: i64, now: i64, permits: u64) -> i64 {
        let burst_slack = self.span(self.max_burst - permits);
        let threshold = next_free.saturating_sub(burst_slack);
        threshold.saturating_sub(now).max(0)
    }
}

impl RateLimiter for SpacingLeakyBucket {
    fn name(&self) -> &'static str {
        "SpacingLeakyBucket"
    }

    fn capacity(&self) -> u64 {
        self.max_burst
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn try_acquire_at(&self, now_nanos: i64, permits: u64) -> Result<AcquireResult> {
        validate_permits(permits, self.max_burst, "bucket capacity")?;

        let mut next_free = self.next_free.lock();
        let current = next_free.unwrap_or(now_nanos);

        let effective = now_nanos.max(current);
        let candidate = effective.saturating_add(self.span(permits));
        let horizon = now_nanos.saturating_add(self.span(self.max_burst));

        if candidate > horizon {
            let retry_after =
                nanos_to_duration(self.retry_after_nanos(current, now_nanos, permits));
            debug!(permits, ?retry_after, "Spacing bucket rejected request");
            return Ok(AcquireResult::Rejected { retry_after });
        }

        *next_free = Some(candidate);
        Ok(AcquireResult::Acquired { permits })
    }

    fn available_tokens_at(&self, now_nanos: i64) -> u64 {
        let next_free = self.next_free.lock().unwrap_or(now_nanos);
        let slack = now_nanos
            .saturating_add(self.span(self.max_burst))
            .saturating_sub(next_free);

        if slack <= 0 {
            return 0;
        }
        u64::try_from(slack / self.interval_nanos)
            .unwrap_or(0)
            .min(self.max_burst)
    }

    fn retry_after_at(&self, now_nanos: i64, permits: u64) -> Result<Duration> {
        validate_permits(permits, self.max_burst, "bucket capacity")?;

        let next_free = self.next_free.lock().unwrap_or(now_nanos);
        Ok(nanos_to_duration(
            self.retry_after_nanos(next_free, now_nanos, permits),
        ))
    }
}
