//! Rate limiting configuration

use super::*;
use crate::core::rate_limiter::{
    Clock, FixedWindowCounter, MonotonicClock, RateLimiter, SlidingWindowLog, SpacingLeakyBucket,
    TokenBucket,
};
use crate::utils::error::{LimiterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Enable rate limiting. A disabled keyed limiter grants every request.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Rate limiting strategy
    #[serde(default)]
    pub strategy: RateLimitStrategy,
    /// Bucket capacity, maximum burst, or permits per window, depending on the strategy
    #[serde(default = "default_capacity")]
    pub capacity: u64,
    /// Tokens added per refill period (token bucket only)
    #[serde(default = "default_refill_tokens")]
    pub refill_tokens: u64,
    /// Refill period, spacing interval, or window size in milliseconds.
    /// Falls back to the strategy's default when unset.
    #[serde(default)]
    pub period_ms: Option<u64>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::for_strategy(RateLimitStrategy::default())
    }
}

impl RateLimitConfig {
    /// Preset for a strategy: 10 permits per second in every case
    pub fn for_strategy(strategy: RateLimitStrategy) -> Self {
        Self {
            enabled: true,
            strategy,
            capacity: default_capacity(),
            refill_tokens: default_refill_tokens(),
            period_ms: None,
        }
    }

    /// Effective refill period / interval / window
    pub fn period(&self) -> Duration {
        Duration::from_millis(
            self.period_ms
                .unwrap_or_else(|| self.strategy.default_period_ms()),
        )
    }

    /// Build a limiter reading the monotonic clock
    pub fn build(&self) -> Result<Arc<dyn RateLimiter>> {
        self.build_with_clock(Arc::new(MonotonicClock))
    }

    /// Build a limiter reading `clock`
    pub fn build_with_clock(&self, clock: Arc<dyn Clock>) -> Result<Arc<dyn RateLimiter>> {
        let period = self.period();
        let limiter: Arc<dyn RateLimiter> = match self.strategy {
            RateLimitStrategy::TokenBucket => Arc::new(
                TokenBucket::new(self.capacity, self.refill_tokens, period)?.with_clock(clock),
            ),
            RateLimitStrategy::SpacingLeakyBucket => {
                Arc::new(SpacingLeakyBucket::new(self.capacity, period)?.with_clock(clock))
            }
            RateLimitStrategy::FixedWindow => {
                Arc::new(FixedWindowCounter::new(self.capacity, period)?.with_clock(clock))
            }
            RateLimitStrategy::SlidingWindowLog => {
                Arc::new(SlidingWindowLog::new(self.capacity, period)?.with_clock(clock))
            }
        };
        Ok(limiter)
    }
}

/// Rate limiting strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Token bucket algorithm
    #[default]
    TokenBucket,
    /// Evenly spaced permits with a bounded burst
    SpacingLeakyBucket,
    /// Fixed window
    FixedWindow,
    /// Sliding window log
    SlidingWindowLog,
}

impl RateLimitStrategy {
    /// All strategies, in presentation order
    pub const ALL: [RateLimitStrategy; 4] = [
        Self::TokenBucket,
        Self::SpacingLeakyBucket,
        Self::FixedWindow,
        Self::SlidingWindowLog,
    ];

    /// Default period in milliseconds: 100ms refill/spacing for the buckets,
    /// 1s windows for the window counters
    pub fn default_period_ms(self) -> u64 {
        match self {
            Self::TokenBucket | Self::SpacingLeakyBucket => 100,
            Self::FixedWindow | Self::SlidingWindowLog => 1000,
        }
    }

    /// Configuration name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TokenBucket => "token_bucket",
            Self::SpacingLeakyBucket => "spacing_leaky_bucket",
            Self::FixedWindow => "fixed_window",
            Self::SlidingWindowLog => "sliding_window_log",
        }
    }
}

impl fmt::Display for RateLimitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateLimitStrategy {
    type Err = LimiterError;

    /// Accepts configuration names as well as the short demo names
    /// (`token`, `spacing`, `fixed`, `sliding`)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "token" | "token_bucket" => Ok(Self::TokenBucket),
            "spacing" | "spacing_leaky_bucket" | "leaky_bucket" => Ok(Self::SpacingLeakyBucket),
            "fixed" | "fixed_window" => Ok(Self::FixedWindow),
            "sliding" | "sliding_window_log" | "sliding_window" => Ok(Self::SlidingWindowLog),
            other => Err(LimiterError::config(format!(
                "Unknown rate limit strategy: {}",
                other
            ))),
        }
    }
}
