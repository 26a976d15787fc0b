//! Token bucket with whole-period refills

use super::clock::{Clock, MonotonicClock};
use super::limiter::RateLimiter;
use super::types::AcquireResult;
use super::utils::{count_to_i64, nanos_to_duration, positive_nanos, validate_permits};
use crate::utils::error::{LimiterError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Token bucket state
#[derive(Debug)]
struct BucketState {
    /// Tokens currently in the bucket
    tokens: u64,
    /// Start of the refill period in progress; `None` until the first reading
    last_refill: Option<i64>,
}

/// A token bucket that starts full and adds `refill_tokens` every
/// `refill_period`, never exceeding `capacity`.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: u64,
    refill_tokens: u64,
    refill_period_nanos: i64,
    state: Mutex<BucketState>,
    clock: Arc<dyn Clock>,
}

impl TokenBucket {
    /// Create a new token bucket
    ///
    /// # Errors
    ///
    /// Returns `LimiterError::InvalidParameters` if any parameter is zero or
    /// `refill_tokens > capacity`.
    pub fn new(capacity: u64, refill_tokens: u64, refill_period: Duration) -> Result<Self> {
        if capacity == 0 || refill_tokens == 0 {
            return Err(LimiterError::invalid_parameters(
                "Capacity, refill tokens, and refill period must be positive",
            ));
        }
        if refill_tokens > capacity {
            return Err(LimiterError::invalid_parameters(
                "Refill tokens cannot exceed capacity",
            ));
        }
        let refill_period_nanos = positive_nanos(refill_period, "Refill period")?;

        Ok(Self {
            capacity,
            refill_tokens,
            refill_period_nanos,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: None,
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

    fn refill(&self, state: &mut BucketState, now: i64) {
        let Some(last_refill) = state.last_refill else {
            state.last_refill = Some(now);
            return;
        };
        if now <= last_refill {
            return;
        }

        let elapsed = now.saturating_sub(last_refill);
        let periods = elapsed / self.refill_period_nanos;
        if periods == 0 {
            return;
        }

        let advance = periods.saturating_mul(self.refill_period_nanos);
        state.last_refill = Some(last_refill.saturating_add(advance));

        // periods > 0 here, so the conversion cannot fail
        let added = u64::try_from(periods)
            .unwrap_or(u64::MAX)
            .saturating_mul(self.refill_tokens);
        state.tokens = state.tokens.saturating_add(added).min(self.capacity);
    }

    fn retry_after_nanos(&self, state: &BucketState, now: i64, permits: u64) -> i64 {
        if state.tokens >= permits {
            return 0;
        }
        let missing = permits - state.tokens;
        let periods_needed = count_to_i64(missing.div_ceil(self.refill_tokens));
        let last_refill = state.last_refill.unwrap_or(now);
        let refilled_at =
            last_refill.saturating_add(periods_needed.saturating_mul(self.refill_period_nanos));

        if refilled_at <= now {
            return 0;
        }
        refilled_at.saturating_sub(now)
    }
}

impl RateLimiter for TokenBucket {
    fn name(&self) -> &'static str {
        "TokenBucket"
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn try_acquire_at(&self, now_nanos: i64, permits: u64) -> Result<AcquireResult> {
        validate_permits(permits, self.capacity, "bucket capacity")?;

        let mut state = self.state.lock();
        self.refill(&mut state, now_nanos);

        if state.tokens >= permits {
            state.tokens -= permits;
            return Ok(AcquireResult::Acquired { permits });
        }

        let retry_after = nanos_to_duration(self.retry_after_nanos(&state, now_nanos, permits));
        debug!(
            permits,
            tokens = state.tokens,
            ?retry_after,
            "Token bucket rejected request"
        );
        Ok(AcquireResult::Rejected { retry_after })
    }

    fn available_tokens_at(&self, now_nanos: i64) -> u64 {
        let mut state = self.state.lock();
        self.refill(&mut state, now_nanos);
        state.tokens
    }

    fn retry_after_at(&self, now_nanos: i64, permits: u64) -> Result<Duration> {
        validate_permits(permits, self.capacity, "bucket capacity")?;

        let mut state = self.state.lock();
        self.refill(&mut state, now_nanos);
        Ok(nanos_to_duration(
            self.retry_after_nanos(&state, now_nanos, permits),
        ))
    }
}
