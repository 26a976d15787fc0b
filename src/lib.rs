//! # rate-limiter-rs
//!
//! In-process rate limiters behind one contract, plus a per-key registry and
//! a small load-shaping demo.
//!
//! ## Features
//!
//! - **Token bucket**: starts full, refills whole batches per period
//! - **Spacing leaky bucket**: evenly spaced permits with a bounded burst
//! - **Fixed window counter**: a quota per aligned window
//! - **Sliding window log**: a quota over the trailing window
//! - **Retry hints**: every rejection says how long to wait
//! - **Deterministic time**: every operation has a variant taking an explicit
//!   nanosecond reading, and limiters accept a pluggable [`Clock`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rate_limiter_rs::{AcquireResult, RateLimiter, TokenBucket};
//! use std::time::Duration;
//!
//! fn main() -> rate_limiter_rs::Result<()> {
//!     // 10 tokens, one more every 100ms
//!     let limiter = TokenBucket::new(10, 1, Duration::from_millis(100))?;
//!
//!     match limiter.try_acquire_at(0, 3)? {
//!         AcquireResult::Acquired { permits } => println!("got {permits}"),
//!         AcquireResult::Rejected { retry_after } => println!("wait {retry_after:?}"),
//!     }
//!     assert_eq!(limiter.available_tokens_at(0), 7);
//!     Ok(())
//! }
//! ```
//!
//! ## Per-key limiting
//!
//! ```rust,no_run
//! use rate_limiter_rs::{KeyedRateLimiter, RateLimitConfig, RateLimitStrategy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RateLimitConfig::for_strategy(RateLimitStrategy::SlidingWindowLog);
//!     let limiter = KeyedRateLimiter::new(config)?;
//!
//!     let result = limiter.try_acquire("client-42", 1).await?;
//!     println!("acquired: {}", result.is_acquired());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod demo;
pub mod utils;

// Re-export main types
pub use config::{Config, DemoConfig, LoggingConfig, RateLimitConfig, RateLimitStrategy};
pub use utils::error::{LimiterError, Result};

// Export limiters
pub use core::rate_limiter::{
    AcquireResult, Clock, FixedWindowCounter, KeyedRateLimiter, ManualClock, MonotonicClock,
    RateLimiter, SlidingWindowLog, SpacingLeakyBucket, TokenBucket, get_global_rate_limiter,
    init_global_rate_limiter,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time in seconds since the Unix epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build information recorded by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
