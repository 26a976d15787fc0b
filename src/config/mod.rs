//! Configuration management
//!
//! Configuration comes from a YAML file or from environment variables.
//! Every section has defaults, so an empty file is a valid configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{LimiterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Limiter settings
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Demo client settings
    #[serde(default)]
    pub demo: DemoConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LimiterError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| LimiterError::Config(format!("Failed to parse config: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from `lookup`, starting from the defaults.
    ///
    /// Recognized keys: `RATE_LIMIT_ENABLED`, `RATE_LIMIT_STRATEGY`,
    /// `RATE_LIMIT_CAPACITY`, `RATE_LIMIT_REFILL_TOKENS`, `RATE_LIMIT_PERIOD_MS`,
    /// `DEMO_BURST_ATTEMPTS`, `DEMO_QPS`, `DEMO_DURATION_SECS`, `DEMO_PERMITS`,
    /// `DEMO_RESPECT_RETRY_AFTER`, `LOG_LEVEL`, `LOG_JSON` and `LOG_WITH_TARGET`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // A strategy switches to that strategy's preset before numeric overrides apply
        if let Some(strategy) = lookup("RATE_LIMIT_STRATEGY") {
            config.rate_limit = RateLimitConfig::for_strategy(strategy.parse()?);
        }
        if let Some(enabled) = parse_var(&lookup, "RATE_LIMIT_ENABLED")? {
            config.rate_limit.enabled = enabled;
        }
        if let Some(capacity) = parse_var(&lookup, "RATE_LIMIT_CAPACITY")? {
            config.rate_limit.capacity = capacity;
        }
        if let Some(refill_tokens) = parse_var(&lookup, "RATE_LIMIT_REFILL_TOKENS")? {
            config.rate_limit.refill_tokens = refill_tokens;
        }
        if let Some(period_ms) = parse_var(&lookup, "RATE_LIMIT_PERIOD_MS")? {
            config.rate_limit.period_ms = Some(period_ms);
        }

        if let Some(burst_attempts) = parse_var(&lookup, "DEMO_BURST_ATTEMPTS")? {
            config.demo.burst_attempts = burst_attempts;
        }
        if let Some(qps) = parse_var(&lookup, "DEMO_QPS")? {
            config.demo.qps = qps;
        }
        if let Some(duration_secs) = parse_var(&lookup, "DEMO_DURATION_SECS")? {
            config.demo.duration_secs = duration_secs;
        }
        if let Some(permits) = parse_var(&lookup, "DEMO_PERMITS")? {
            config.demo.permits = permits;
        }
        if let Some(respect) = parse_var(&lookup, "DEMO_RESPECT_RETRY_AFTER")? {
            config.demo.respect_retry_after = respect;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = parse_var(&lookup, "LOG_JSON")? {
            config.logging.json = json;
        }
        if let Some(with_target) = parse_var(&lookup, "LOG_WITH_TARGET")? {
            config.logging.with_target = with_target;
        }

        config.validate()?;
        Ok(config)
    }

    /// Switch to the preset for `strategy`, keeping the enabled flag.
    /// Already using `strategy` leaves custom limits untouched.
    pub fn use_strategy(&mut self, strategy: RateLimitStrategy) {
        if self.rate_limit.strategy != strategy {
            self.rate_limit = RateLimitConfig {
                enabled: self.rate_limit.enabled,
                ..RateLimitConfig::for_strategy(strategy)
            };
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.rate_limit
            .validate()
            .map_err(|e| LimiterError::Config(format!("Rate limit config error: {}", e)))?;

        self.demo
            .validate()
            .map_err(|e| LimiterError::Config(format!("Demo config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| LimiterError::Config(format!("Logging config error: {}", e)))?;

        Validate::validate(self).map_err(LimiterError::Config)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parse an optional variable, naming the key on failure
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| LimiterError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}
