//! Configuration loading tests

#[cfg(test)]
mod tests {
    use rate_limiter_rs::demo::burst_demo;
    use rate_limiter_rs::{Config, LimiterError, RateLimitStrategy};
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_config_drives_limiter() {
        let file = write_config(
            r#"
rate_limit:
  strategy: spacing_leaky_bucket
  capacity: 4
  period_ms: 50
demo:
  burst_attempts: 6
"#,
        );

        let config = tokio_test::block_on(Config::from_file(file.path())).unwrap();
        assert_eq!(
            config.rate_limit.strategy,
            RateLimitStrategy::SpacingLeakyBucket
        );

        let limiter = config.rate_limit.build().unwrap();
        assert_eq!(limiter.name(), "SpacingLeakyBucket");

        let report = burst_demo(
            limiter.as_ref(),
            config.demo.burst_attempts,
            config.demo.permits,
        )
        .unwrap();
        assert_eq!(report.ok, 4);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.max_retry_after, Some(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_file_with_invalid_section_names_the_section() {
        let file = write_config("demo:\n  qps: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();

        assert!(matches!(err, LimiterError::Config(_)));
        assert!(err.to_string().contains("Demo config error"), "{}", err);
    }

    #[tokio::test]
    async fn test_file_with_malformed_yaml() {
        let file = write_config("rate_limit: [unclosed\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"), "{}", err);
    }

    #[test]
    fn test_environment_lookup_matches_file() {
        let vars: HashMap<&str, &str> = [
            ("RATE_LIMIT_STRATEGY", "fixed_window"),
            ("RATE_LIMIT_CAPACITY", "4"),
            ("RATE_LIMIT_PERIOD_MS", "50"),
            ("DEMO_BURST_ATTEMPTS", "6"),
        ]
        .into_iter()
        .collect();
        let from_env = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        let from_yaml = Config::from_yaml_str(
            r#"
rate_limit:
  strategy: fixed_window
  capacity: 4
  period_ms: 50
demo:
  burst_attempts: 6
"#,
        )
        .unwrap();

        assert_eq!(from_env, from_yaml);
    }

    #[test]
    fn test_config_serializes_back_to_yaml() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        let file = write_config(&yaml);

        let reloaded = tokio_test::block_on(Config::from_file(file.path())).unwrap();
        assert_eq!(reloaded, config);
    }
}
