//! Rate Limiting Implementation
//!
//! Four in-process algorithms behind one [`RateLimiter`] contract:
//!
//! - [`TokenBucket`]: starts full, refills in whole periods
//! - [`SpacingLeakyBucket`]: spaces permits evenly with a bounded burst
//! - [`FixedWindowCounter`]: a quota per aligned window
//! - [`SlidingWindowLog`]: a quota over the trailing window, one log entry per permit
//!
//! plus a [`KeyedRateLimiter`] that keeps an independent limiter per caller.

mod clock;
mod fixed_window;
mod leaky_bucket;
mod limiter;
mod registry;
mod sliding_log;
mod token_bucket;
mod types;
pub(crate) mod utils;


// Re-export public types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use fixed_window::FixedWindowCounter;
pub use leaky_bucket::SpacingLeakyBucket;
pub use limiter::RateLimiter;
pub use registry::{KeyedRateLimiter, get_global_rate_limiter, init_global_rate_limiter};
pub use sliding_log::SlidingWindowLog;
pub use token_bucket::TokenBucket;
pub use types::AcquireResult;
