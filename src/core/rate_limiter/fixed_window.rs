//! Fixed window counter aligned to multiples of the window size

use super::clock::{Clock, MonotonicClock};
use super::limiter::RateLimiter;
use super::types::AcquireResult;
use super::utils::{nanos_to_duration, positive_nanos, validate_permits};
use crate::utils::error::{LimiterError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug)]
struct WindowState {
    /// Start of the current window; `None` until the first reading
    window_start: Option<i64>,
    remaining: u64,
}

/// Allows `rate` permits per aligned window of `window` length
#[derive(Debug)]
pub struct FixedWindowCounter {
    rate: u64,
    window_nanos: i64,
    state: Mutex<WindowState>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowCounter {
    /// Create a new fixed window counter
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
            state: Mutex::new(WindowState {
                window_start: None,
                remaining: rate,
            }),
            clock: Arc::new(MonotonicClock),
        })
    }

    /// Replace the clock used by the convenience methods
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn window_start_for(&self, now: i64) -> i64 {
        now.saturating_sub(now.rem_euclid(self.window_nanos))
    }

    fn roll_window(&self, state: &mut WindowState, now: i64) {
        let Some(window_start) = state.window_start else {
            state.remaining = self.rate;
            state.window_start = Some(self.window_start_for(now));
            return;
        };
        if now <= window_start {
            return;
        }

        let current = self.window_start_for(now);
        if current > window_start {
            trace!(window_start = current, "Fixed window rolled over");
            state.remaining = self.rate;
            state.window_start = Some(current);
        }
    }

    fn retry_after_nanos(&self, state: &WindowState, now: i64, permits: u64) -> i64 {
        if state.remaining >= permits {
            return 0;
        }
        let window_start = state
            .window_start
            .unwrap_or_else(|| self.window_start_for(now));
        let next_window = window_start.saturating_add(self.window_nanos);
        if next_window <= now {
            return 0;
        }
        next_window.saturating_sub(now)
    }
}

impl RateLimiter for FixedWindowCounter {
    fn name(&self) -> &'static str {
        "FixedWindowCounter"
    }

    fn capacity(&self) -> u64 {
        self.rate
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn try_acquire_at(&self, now_nanos: i64, permits: u64) -> Result<AcquireResult> {
        validate_permits(permits, self.rate, "allowed rate")?;

        let mut state = self.state.lock();
        self.roll_window(&mut state, now_nanos);

        if state.remaining >= permits {
            state.remaining -= permits;
            return Ok(AcquireResult::Acquired { permits });
        }

        let retry_after = nanos_to_duration(self.retry_after_nanos(&state, now_nanos, permits));
        debug!(
            permits,
            remaining = state.remaining,
            ?retry_after,
            "Fixed window rejected request"
        );
        Ok(AcquireResult::Rejected { retry_after })
    }

    fn available_tokens_at(&self, now_nanos: i64) -> u64 {
        let mut state = self.state.lock();
        self.roll_window(&mut state, now_nanos);
        state.remaining
    }

    fn retry_after_at(&self, now_nanos: i64, permits: u64) -> Result<Duration> {
        validate_permits(permits, self.rate, "allowed rate")?;

        let mut state = self.state.lock();
        self.roll_window(&mut state, now_nanos);
        Ok(nanos_to_duration(
            self.retry_after_nanos(&state, now_nanos, permits),
        ))
    }
}
