//! Demo integration tests

#[cfg(test)]
mod tests {
    use crate::common::manual_limiter;
    use rate_limiter_rs::demo::{ClientMode, SteadyOptions, burst_demo, steady_demo};
    use rate_limiter_rs::{RateLimitConfig, RateLimitStrategy};
    use std::time::Duration;

    #[test]
    fn test_burst_demo_for_every_strategy() {
        let expected_max_retry = [
            (RateLimitStrategy::TokenBucket, Duration::from_millis(100)),
            (
                RateLimitStrategy::SpacingLeakyBucket,
                Duration::from_millis(100),
            ),
            (RateLimitStrategy::FixedWindow, Duration::from_secs(1)),
            // Entries exactly one window old still count
            (
                RateLimitStrategy::SlidingWindowLog,
                Duration::from_secs(1) + Duration::from_nanos(1),
            ),
        ];

        for (strategy, max_retry) in expected_max_retry {
            let (_clock, limiter) = manual_limiter(strategy, 0);
            let report = burst_demo(limiter.as_ref(), 50, 1).unwrap();

            assert_eq!(report.ok, 10, "{}", strategy);
            assert_eq!(report.rejected, 40, "{}", strategy);
            assert_eq!(report.available_tokens, 0, "{}", strategy);
            assert_eq!(report.first_retry_hints.len(), 5);
            assert_eq!(report.max_retry_after, Some(max_retry), "{}", strategy);
        }
    }

    #[tokio::test]
    async fn test_polite_client_reports_backoff() {
        let limiter = RateLimitConfig::for_strategy(RateLimitStrategy::FixedWindow)
            .build()
            .unwrap();
        let options = SteadyOptions {
            qps: 100,
            duration: Duration::from_millis(250),
            permits: 1,
            mode: ClientMode::Polite,
        };

        let report = steady_demo(limiter.as_ref(), options).await.unwrap();

        assert_eq!(report.mode, ClientMode::Polite);
        assert!(report.ok >= 1);
        assert!(report.ok <= 20);
        if report.rejected > 0 {
            assert!(report.avg_backoff_ms().is_some());
            assert!(report.max_backoff > Duration::ZERO);
            assert!(report.to_string().contains("backoffWins="));
        }
    }

    #[tokio::test]
    async fn test_hammer_client_sees_more_rejections_than_polite() {
        let run = |mode| async move {
            let limiter = RateLimitConfig::for_strategy(RateLimitStrategy::FixedWindow)
                .build()
                .unwrap();
            let options = SteadyOptions {
                qps: 200,
                duration: Duration::from_millis(200),
                permits: 1,
                mode,
            };
            steady_demo(limiter.as_ref(), options).await.unwrap()
        };

        let polite = run(ClientMode::Polite).await;
        let hammer = run(ClientMode::Hammer).await;

        assert!(hammer.rejected >= polite.rejected);
        assert_eq!(hammer.total_backoff, Duration::ZERO);
    }
}
