//! Burst demo: every attempt at the same clock reading

use crate::core::rate_limiter::{AcquireResult, RateLimiter};
use crate::utils::error::Result;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Number of rejections whose retry hint is reported individually
const REPORTED_REJECTIONS: usize = 5;

/// Outcome of a burst
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstReport {
    /// Limiter algorithm name
    pub algorithm: &'static str,
    /// Granted attempts
    pub ok: u32,
    /// Rejected attempts
    pub rejected: u32,
    /// Permits available right after the burst
    pub available_tokens: u64,
    /// Retry hints of the first rejections, in order
    pub first_retry_hints: Vec<Duration>,
    /// Longest retry hint seen, if anything was rejected
    pub max_retry_after: Option<Duration>,
}

/// Make `attempts` acquisitions of `permits` at a single clock reading
pub fn burst_demo(limiter: &dyn RateLimiter, attempts: u32, permits: u64) -> Result<BurstReport> {
    let now = limiter.clock().now_nanos();
    info!(algorithm = limiter.name(), attempts, "Starting burst demo");

    let mut report = BurstReport {
        algorithm: limiter.name(),
        ok: 0,
        rejected: 0,
        available_tokens: 0,
        first_retry_hints: Vec::with_capacity(REPORTED_REJECTIONS),
        max_retry_after: None,
    };

    for _ in 0..attempts {
        match limiter.try_acquire_at(now, permits)? {
            AcquireResult::Acquired { .. } => report.ok += 1,
            AcquireResult::Rejected { retry_after } => {
                report.rejected += 1;
                if report.first_retry_hints.len() < REPORTED_REJECTIONS {
                    report.first_retry_hints.push(retry_after);
                }
                report.max_retry_after = report.max_retry_after.max(Some(retry_after));
            }
        }
    }

    report.available_tokens = limiter.available_tokens_at(now);
    Ok(report)
}

impl fmt::Display for BurstReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== burstDemo ==")?;
        for (i, hint) in self.first_retry_hints.iter().enumerate() {
            writeln!(f, "reject #{} retryAfter={}ns", i + 1, hint.as_nanos())?;
        }
        write!(
            f,
            "ok={} rejected={} availableTokens={}",
            self.ok, self.rejected, self.available_tokens
        )?;
        if let Some(max) = self.max_retry_after {
            write!(f, "\nmaxRetryAfter={}ns", max.as_nanos())?;
        }
        Ok(())
    }
}
