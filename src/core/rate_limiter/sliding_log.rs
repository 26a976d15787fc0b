//! Sliding window log
//!
//! Keeps one timestamp per permit. Rejected attempts are logged too, so a
//! client that keeps pushing while over the limit extends its own penalty.

use super::clock::{Clock, MonotonicClock};
use super::limiter::RateLimiter;
use super::types::AcquireResult;
use super::utils::{nanos_to_duration, positive_nanos, validate_permits};
use crate::utils::error::{LimiterError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::iter;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Allows at most `rate` logged permits in any trailing `window`
#[derive(Debug)]
pub struct SlidingWindowLog {
    rate: u64,
    window_nanos: i64,
    log: Mutex<VecDeque<i64>>,
    clock: Arc<dyn Clock>,
}

impl SlidingWindowLog {
    /// Create a new sliding window log
    ///
    /// # Errors
    ///
    /// Returns `LimiterError::InvalidParameters` if `rate` or `window` is zero.
    pub fn new(rate: u64, window: Duration) -> Result<Self> {
        if rate == 0 {
            return Err(LimiterError::invalid_parameters(
                "Rate, window size must be positive",
            ));
        }
        let window_nanos = positive_nanos(window, "Window size")?;

        Ok(Self {
            rate,
            window_nanos,
            log: Mutex::new(VecDeque::new()),
            clock: Arc::new(MonotonicClock),
        })
    }

    /// Replace the clock used by the convenience methods
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Drop entries strictly older than `now - window`.
    /// Readings older than the newest entry leave the log untouched.
    fn evict(&self, log: &mut VecDeque<i64>, now: i64) {
        match log.back() {
            Some(&newest) if now >= newest => {}
            _ => return,
        }
        let window_start = now.saturating_sub(self.window_nanos);
        while log.front().is_some_and(|&oldest| oldest < window_start) {
            log.pop_front();
        }
    }

    fn logged(log: &VecDeque<i64>) -> u64 {
        u64::try_from(log.len()).unwrap_or(u64::MAX)
    }

    fn retry_after_nanos(&self, log: &VecDeque<i64>, now: i64, permits: u64) -> i64 {
        let logged = Self::logged(log);
        if logged.saturating_add(permits) <= self.rate {
            return 0;
        }

        // permits <= rate, so the entry index is always inside the log
        let deficit = permits + logged - self.rate;
        let index = usize::try_from(deficit - 1).unwrap_or(usize::MAX);
        let Some(&frees_up) = log.get(index) else {
            return 1;
        };
        // An entry exactly one window old still counts; it leaves one tick later
        frees_up
            .saturating_add(self.window_nanos)
            .saturating_add(1)
            .saturating_sub(now)
            .max(1)
    }
}

impl RateLimiter for SlidingWindowLog {
    fn name(&self) -> &'static str {
        "SlidingWindowLog"
    }

    fn capacity(&self) -> u64 {
        self.rate
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn try_acquire_at(&self, now_nanos: i64, permits: u64) -> Result<AcquireResult> {
        validate_permits(permits, self.rate, "allowed rate")?;

        let mut log = self.log.lock();
        self.evict(&mut log, now_nanos);

        let count = usize::try_from(permits).unwrap_or(usize::MAX);
        log.extend(iter::repeat_n(now_nanos, count));

        if Self::logged(&log) <= self.rate {
            return Ok(AcquireResult::Acquired { permits });
        }

        let retry_after = nanos_to_duration(self.retry_after_nanos(&log, now_nanos, permits));
        debug!(
            permits,
            logged = log.len(),
            ?retry_after,
            "Sliding window log rejected request"
        );
        Ok(AcquireResult::Rejected { retry_after })
    }

    fn available_tokens_at(&self, now_nanos: i64) -> u64 {
        let mut log = self.log.lock();
        self.evict(&mut log, now_nanos);
        self.rate.saturating_sub(Self::logged(&log))
    }

    fn retry_after_at(&self, now_nanos: i64, permits: u64) -> Result<Duration> {
        validate_permits(permits, self.rate, "allowed rate")?;

        let mut log = self.log.lock();
        self.evict(&mut log, now_nanos);
        Ok(nanos_to_duration(
            self.retry_after_nanos(&log, now_nanos, permits),
        ))
    }
}
