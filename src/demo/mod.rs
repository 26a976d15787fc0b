//! Demo clients
//!
//! Two ways of driving a limiter and reporting what happened:
//!
//! - [`burst_demo`]: many attempts at one instant
//! - [`steady_demo`]: a paced client over real time, either honoring retry
//!   hints ([`ClientMode::Polite`]) or ignoring them ([`ClientMode::Hammer`])

mod burst;
mod steady;

pub use burst::{BurstReport, burst_demo};
pub use steady::{SteadyOptions, SteadyReport, steady_demo};

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the steady client reacts to rejections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientMode {
    /// Waits for the retry hint before trying again, like a client honoring
    /// an HTTP 429 `Retry-After`
    #[default]
    Polite,
    /// Keeps attempting at the target rate regardless of rejections
    Hammer,
}

impl ClientMode {
    /// Mode for a client that does or does not honor retry hints
    pub fn from_respect_retry_after(respect: bool) -> Self {
        if respect { Self::Polite } else { Self::Hammer }
    }

    /// Whether retry hints are honored
    pub fn respects_retry_after(self) -> bool {
        self == Self::Polite
    }
}

impl fmt::Display for ClientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polite => f.write_str("POLITE"),
            Self::Hammer => f.write_str("HAMMER"),
        }
    }
}
