//! Top level configuration validators

use super::trait_def::Validate;
use crate::config::Config;
use crate::config::models::*;
use crate::utils::logging::parse_filter;
use tracing::debug;

/// Largest steady demo rate; higher rates round the pacing interval to zero
const MAX_DEMO_QPS: u32 = 1_000_000;

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.rate_limit.validate()?;
        self.demo.validate()?;
        self.logging.validate()?;

        if self.demo.permits > self.rate_limit.capacity {
            return Err(format!(
                "Demo permits ({}) cannot exceed rate limit capacity ({})",
                self.demo.permits, self.rate_limit.capacity
            ));
        }

        Ok(())
    }
}

impl Validate for DemoConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating demo configuration");

        if self.burst_attempts == 0 {
            return Err("Demo burst_attempts must be greater than 0".to_string());
        }

        if self.qps == 0 || self.qps > MAX_DEMO_QPS {
            return Err(format!(
                "Demo qps must be between 1 and {}, got {}",
                MAX_DEMO_QPS, self.qps
            ));
        }

        if self.duration_secs == 0 {
            return Err("Demo duration_secs must be greater than 0".to_string());
        }

        if self.permits == 0 {
            return Err("Demo permits must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        parse_filter(&self.level).map(|_| ()).map_err(|e| e.to_string())
    }
}
