//! Generated operation sequences
//!
//! A scenario is a list of steps: time moves forward or an acquire is
//! attempted at the current reading. Invariants are checked on every step and
//! failures carry the trace of steps so far.

use proptest::prelude::*;
use rate_limiter_rs::RateLimiter;
use std::time::Duration;

/// Scenario start reading, away from zero
pub const SCENARIO_START: i64 = 1_000_000_000;

/// Longest single time jump
const MAX_ADVANCE_NANOS: i64 = 5_000_000_000;

/// One step of a scenario
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Move the clock forward; zero models same-instant bursts
    Advance(i64),
    /// Attempt to acquire permits at the current reading
    Acquire(u64),
}

/// Mostly acquires, sometimes time passes
pub fn step(capacity: u64) -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (1..=capacity).prop_map(Step::Acquire),
        2 => (0..=MAX_ADVANCE_NANOS).prop_map(Step::Advance),
    ]
}

/// A short load session
pub fn scenario(capacity: u64, len: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step(capacity), len)
}

/// Run `steps` against `limiter`, checking the contract on every acquire.
///
/// Every rejection must carry a positive retry hint.
pub fn run_scenario(limiter: &dyn RateLimiter, steps: &[Step]) -> Result<(), TestCaseError> {
    let name = limiter.name();
    let capacity = limiter.capacity();
    let mut now = SCENARIO_START;
    let mut trace = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        let permits = match *step {
            Step::Advance(delta) => {
                now = now.saturating_add(delta);
                trace.push(format!("{}: advance +{}ns", i, delta));
                continue;
            }
            Step::Acquire(permits) => permits,
        };
        trace.push(format!("{}: acquire {}", i, permits));

        let available_before = limiter.available_tokens_at(now);
        prop_assert!(
            available_before <= capacity,
            "{}: available {} above capacity before step {}\ntrace={:?}",
            name,
            available_before,
            i,
            trace
        );

        let predicted = limiter
            .retry_after_at(now, permits)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let result = limiter
            .try_acquire_at(now, permits)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        if predicted == Duration::ZERO {
            prop_assert!(
                result.is_acquired(),
                "{}: zero retry predicted but rejected at step {}\ntrace={:?}",
                name,
                i,
                trace
            );
            prop_assert_eq!(result.retry_after(), Duration::ZERO);
        } else if !result.is_acquired() {
            prop_assert!(
                result.retry_after() > Duration::ZERO,
                "{}: rejection without retry hint at step {}\ntrace={:?}",
                name,
                i,
                trace
            );
        }

        let available_after = limiter.available_tokens_at(now);
        prop_assert!(
            available_after <= capacity,
            "{}: available {} above capacity after step {}\ntrace={:?}",
            name,
            available_after,
            i,
            trace
        );
    }
    Ok(())
}
