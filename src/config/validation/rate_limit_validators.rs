//! Rate limit validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating rate limit configuration");

        if self.capacity == 0 {
            return Err("Rate limit capacity must be greater than 0".to_string());
        }

        if self.period_ms == Some(0) {
            return Err("Rate limit period_ms must be greater than 0".to_string());
        }

        if self.strategy == RateLimitStrategy::TokenBucket {
            if self.refill_tokens == 0 {
                return Err("Token bucket refill_tokens must be greater than 0".to_string());
            }
            if self.refill_tokens > self.capacity {
                return Err(format!(
                    "Token bucket refill_tokens ({}) cannot exceed capacity ({})",
                    self.refill_tokens, self.capacity
                ));
            }
        }

        Ok(())
    }
}
