//! Contract tests shared by every algorithm

#[cfg(test)]
mod tests {
    use crate::common::{AcquireResultAssertions, CAPACITY, manual_limiter};
    use rate_limiter_rs::{LimiterError, RateLimitStrategy, RateLimiter};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_every_limiter_grants_capacity_then_rejects() {
        for strategy in RateLimitStrategy::ALL {
            let (_clock, limiter) = manual_limiter(strategy, 0);

            for _ in 0..CAPACITY {
                limiter.try_acquire(1).unwrap().assert_acquired();
            }
            let retry = limiter.try_acquire(1).unwrap().assert_rejected();

            assert!(retry > Duration::ZERO, "{} rejected without a hint", strategy);
            assert_eq!(limiter.available_tokens(), 0, "{}", strategy);
        }
    }

    #[test]
    fn test_retry_hint_is_honored() {
        for strategy in RateLimitStrategy::ALL {
            let (clock, limiter) = manual_limiter(strategy, 0);
            limiter.try_acquire(CAPACITY).unwrap().assert_acquired();

            let retry = limiter.retry_after(1).unwrap();
            assert!(retry > Duration::ZERO);

            // Once the hint has elapsed the permit is available again
            clock.advance(retry);
            limiter.try_acquire(1).unwrap().assert_acquired();
        }
    }

    #[test]
    fn test_invalid_permits_are_errors_not_rejections() {
        for strategy in RateLimitStrategy::ALL {
            let (_clock, limiter) = manual_limiter(strategy, 0);

            let err = limiter.try_acquire(0).unwrap_err();
            assert!(matches!(err, LimiterError::NonPositivePermits));
            assert!(err.is_permit_error());

            let err = limiter.retry_after(CAPACITY + 1).unwrap_err();
            assert!(matches!(
                err,
                LimiterError::PermitsExceedLimit { requested: 11, limit: 10, .. }
            ));

            // Errors leave the state untouched
            assert_eq!(limiter.available_tokens(), CAPACITY);
        }
    }

    #[test]
    fn test_concurrent_acquires_never_over_grant() {
        for strategy in RateLimitStrategy::ALL {
            let (_clock, limiter) = manual_limiter(strategy, 42);
            let granted = Arc::new(AtomicU64::new(0));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let limiter: Arc<dyn RateLimiter> = Arc::clone(&limiter);
                    let granted = Arc::clone(&granted);
                    thread::spawn(move || {
                        for _ in 0..50 {
                            if limiter.try_acquire(1).unwrap().is_acquired() {
                                granted.fetch_add(1, Ordering::SeqCst);
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(granted.load(Ordering::SeqCst), CAPACITY, "{}", strategy);
        }
    }

    #[test]
    fn test_names_match_algorithms() {
        let names: Vec<_> = RateLimitStrategy::ALL
            .into_iter()
            .map(|strategy| manual_limiter(strategy, 0).1.name())
            .collect();
        assert_eq!(
            names,
            [
                "TokenBucket",
                "SpacingLeakyBucket",
                "FixedWindowCounter",
                "SlidingWindowLog"
            ]
        );
    }
}
