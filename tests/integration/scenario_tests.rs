//! Scenario tests: generated sequences of time jumps and acquires

#[cfg(test)]
mod tests {
    use crate::common::scenarios::scenario;
    use crate::common::{CAPACITY, limiter_with_period, run_scenario};
    use proptest::prelude::*;
    use rate_limiter_rs::RateLimitStrategy;

    const STEPS: usize = 300;

    fn check(strategy: RateLimitStrategy, period_ms: u64) {
        proptest!(ProptestConfig::with_cases(200), |(
            steps in scenario(CAPACITY, STEPS),
        )| {
            let limiter = limiter_with_period(strategy, period_ms);
            run_scenario(limiter.as_ref(), &steps)?;
        })
    }

    #[test]
    fn token_bucket_scenarios_hold_invariants() {
        check(RateLimitStrategy::TokenBucket, 100);
    }

    #[test]
    fn spacing_leaky_bucket_scenarios_hold_invariants() {
        check(RateLimitStrategy::SpacingLeakyBucket, 100);
    }

    #[test]
    fn fixed_window_counter_scenarios_hold_invariants() {
        check(RateLimitStrategy::FixedWindow, 100);
    }

    #[test]
    fn sliding_window_log_scenarios_hold_invariants() {
        check(RateLimitStrategy::SlidingWindowLog, 1000);
    }
}
