//! Keyed limiter integration tests

#[cfg(test)]
mod tests {
    use rate_limiter_rs::{KeyedRateLimiter, ManualClock, RateLimitConfig, RateLimitStrategy};
    use std::sync::Arc;
    use std::time::Duration;

    fn keyed(strategy: RateLimitStrategy) -> (Arc<ManualClock>, Arc<KeyedRateLimiter>) {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = KeyedRateLimiter::new(RateLimitConfig::for_strategy(strategy))
            .unwrap()
            .with_clock(clock.clone());
        (clock, Arc::new(limiter))
    }

    #[tokio::test]
    async fn test_concurrent_tasks_share_one_budget_per_key() {
        let (_clock, limiter) = keyed(RateLimitStrategy::TokenBucket);

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    let mut granted = 0u64;
                    for _ in 0..5 {
                        if limiter.try_acquire("shared", 1).await.unwrap().is_acquired() {
                            granted += 1;
                        }
                    }
                    granted
                })
            })
            .collect();

        let mut total = 0;
        for task in tasks {
            total += task.await.unwrap();
        }

        assert_eq!(total, 10);
        assert_eq!(limiter.len().await, 1);
        assert_eq!(limiter.available_tokens("shared").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_keys_recover_independently() {
        let (clock, limiter) = keyed(RateLimitStrategy::FixedWindow);

        assert!(limiter.try_acquire("a", 10).await.unwrap().is_acquired());
        assert!(!limiter.try_acquire("a", 1).await.unwrap().is_acquired());
        assert!(limiter.try_acquire("b", 1).await.unwrap().is_acquired());

        assert_eq!(
            limiter.retry_after("a", 1).await.unwrap(),
            Duration::from_secs(1)
        );

        clock.advance(Duration::from_secs(1));
        assert!(limiter.try_acquire("a", 1).await.unwrap().is_acquired());
        assert_eq!(limiter.available_tokens("b").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_cleanup_task_drops_idle_keys() {
        let (clock, limiter) = keyed(RateLimitStrategy::SlidingWindowLog);

        limiter.try_acquire("idle", 1).await.unwrap();
        assert_eq!(limiter.len().await, 1);

        // The key was last seen a full second ago on the limiter's clock
        clock.advance(Duration::from_secs(1));
        let handle = Arc::clone(&limiter).start_cleanup_task(Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(limiter.is_empty().await);
    }

    #[tokio::test]
    async fn test_disabled_limiter_tracks_nothing() {
        let config = RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        };
        let limiter = KeyedRateLimiter::new(config).unwrap();

        for _ in 0..100 {
            assert!(limiter.try_acquire("anyone", 10).await.unwrap().is_acquired());
        }
        assert!(!limiter.is_enabled());
        assert!(limiter.is_empty().await);
    }
}
