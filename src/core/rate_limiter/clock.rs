//! Time sources for rate limiters
//!
//! Limiters consume plain nanosecond readings so that every algorithm can be
//! driven deterministically from tests. The origin of a reading is arbitrary;
//! only differences between readings are meaningful.

use super::utils::duration_to_nanos;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

/// A trait for abstracting time operations to enable testing.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current reading in nanoseconds
    fn now_nanos(&self) -> i64;
}

static PROCESS_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Standard monotonic clock, measuring nanoseconds since the first reading in
/// the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now_nanos(&self) -> i64 {
        let anchor = PROCESS_ANCHOR.get_or_init(Instant::now);
        duration_to_nanos(anchor.elapsed())
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a clock reading `start_nanos`
    pub fn new(start_nanos: i64) -> Self {
        Self {
            now: AtomicI64::new(start_nanos),
        }
    }

    /// Jump to an absolute reading
    pub fn set(&self, now_nanos: i64) {
        self.now.store(now_nanos, Ordering::SeqCst);
    }

    /// Move forward by `by`, saturating at `i64::MAX`
    pub fn advance(&self, by: Duration) {
        let delta = duration_to_nanos(by);
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(delta))
            });
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
