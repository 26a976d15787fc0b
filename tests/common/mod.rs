//! Common test utilities for rate-limiter-rs
//!
//! - Limiters wired to a [`ManualClock`]
//! - Generated operation sequences
//! - Custom assertions

pub mod scenarios;

pub use assertions::AcquireResultAssertions;
pub use scenarios::{Step, run_scenario};

use rate_limiter_rs::{ManualClock, RateLimitConfig, RateLimitStrategy, RateLimiter};
use std::sync::Arc;

/// Capacity shared by the preset limiters
pub const CAPACITY: u64 = 10;

/// A limiter of the given strategy using its preset, reading a manual clock
pub fn manual_limiter(
    strategy: RateLimitStrategy,
    start_nanos: i64,
) -> (Arc<ManualClock>, Arc<dyn RateLimiter>) {
    let clock = Arc::new(ManualClock::new(start_nanos));
    let limiter = RateLimitConfig::for_strategy(strategy)
        .build_with_clock(clock.clone())
        .unwrap();
    (clock, limiter)
}

/// Build a limiter with a custom period from a strategy preset
pub fn limiter_with_period(strategy: RateLimitStrategy, period_ms: u64) -> Arc<dyn RateLimiter> {
    RateLimitConfig {
        period_ms: Some(period_ms),
        ..RateLimitConfig::for_strategy(strategy)
    }
    .build()
    .unwrap()
}
