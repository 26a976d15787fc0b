//! Demo client configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the burst and steady demos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoConfig {
    /// Attempts made at a single instant by the burst demo
    #[serde(default = "default_burst_attempts")]
    pub burst_attempts: u32,
    /// Target attempts per second for the steady demo
    #[serde(default = "default_qps")]
    pub qps: u32,
    /// Steady demo length in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    /// Permits requested per attempt
    #[serde(default = "default_permits")]
    pub permits: u64,
    /// Honor retry hints (polite client) or ignore them (hammer client)
    #[serde(default = "default_true")]
    pub respect_retry_after: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            burst_attempts: default_burst_attempts(),
            qps: default_qps(),
            duration_secs: default_duration_secs(),
            permits: default_permits(),
            respect_retry_after: true,
        }
    }
}

impl DemoConfig {
    /// Steady demo length
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}
