//! Steady demo: a paced client running for a fixed time

use super::ClientMode;
use crate::config::DemoConfig;
use crate::core::rate_limiter::utils::{duration_to_nanos, nanos_to_duration};
use crate::core::rate_limiter::{AcquireResult, RateLimiter};
use crate::utils::{as_millis_f64, format_duration};
use crate::utils::error::Result;
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Every this many successes the next attempt is delayed by random jitter
const JITTER_EVERY: u64 = 32;

/// Upper bound (exclusive) of the jitter in nanoseconds
const MAX_JITTER_NANOS: i64 = 50_000;

/// Steady demo parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteadyOptions {
    /// Target attempts per second; zero is treated as one
    pub qps: u32,
    /// How long to run
    pub duration: Duration,
    /// Permits per attempt
    pub permits: u64,
    /// Reaction to rejections
    pub mode: ClientMode,
}

impl Default for SteadyOptions {
    fn default() -> Self {
        Self::from(&DemoConfig::default())
    }
}

impl From<&DemoConfig> for SteadyOptions {
    fn from(config: &DemoConfig) -> Self {
        Self {
            qps: config.qps,
            duration: config.duration(),
            permits: config.permits,
            mode: ClientMode::from_respect_retry_after(config.respect_retry_after),
        }
    }
}

impl SteadyOptions {
    /// Spacing between scheduled attempts, at least one nanosecond
    pub fn interval(&self) -> Duration {
        nanos_to_duration((NANOS_PER_SEC / i64::from(self.qps.max(1))).max(1))
    }
}

/// Outcome of a steady run
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyReport {
    /// Limiter algorithm name
    pub algorithm: &'static str,
    /// Client behavior
    pub mode: ClientMode,
    /// Target attempts per second
    pub target_qps: u32,
    /// Requested run length
    pub duration: Duration,
    /// Measured run length
    pub elapsed: Duration,
    /// Granted attempts
    pub ok: u64,
    /// Rejected attempts
    pub rejected: u64,
    /// Time spent sleeping until the next scheduled attempt
    pub total_pace_sleep: Duration,
    /// Sum of retry hints received (polite client only)
    pub total_backoff: Duration,
    /// Longest retry hint received (polite client only)
    pub max_backoff: Duration,
    /// Rejections whose retry hint pushed the next attempt past the pacing interval
    pub backoff_wins: u64,
}

impl SteadyReport {
    fn new(limiter: &dyn RateLimiter, options: &SteadyOptions) -> Self {
        Self {
            algorithm: limiter.name(),
            mode: options.mode,
            target_qps: options.qps,
            duration: options.duration,
            elapsed: Duration::ZERO,
            ok: 0,
            rejected: 0,
            total_pace_sleep: Duration::ZERO,
            total_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_wins: 0,
        }
    }

    /// All attempts
    pub fn total(&self) -> u64 {
        self.ok + self.rejected
    }

    fn per_second(&self, count: u64) -> f64 {
        count as f64 / self.elapsed.as_secs_f64().max(1e-9)
    }

    /// Measured attempt rate
    pub fn attempt_qps(&self) -> f64 {
        self.per_second(self.total())
    }

    /// Measured grant rate
    pub fn ok_qps(&self) -> f64 {
        self.per_second(self.ok)
    }

    /// Rejected share of attempts, in percent
    pub fn reject_rate_percent(&self) -> f64 {
        100.0 * self.rejected as f64 / self.total().max(1) as f64
    }

    /// Average pacing sleep per attempt in milliseconds
    pub fn avg_pace_sleep_ms(&self) -> f64 {
        as_millis_f64(self.total_pace_sleep) / self.total().max(1) as f64
    }

    /// Average retry hint in milliseconds; `None` unless a polite client was rejected
    pub fn avg_backoff_ms(&self) -> Option<f64> {
        if !self.mode.respects_retry_after() || self.rejected == 0 {
            return None;
        }
        Some(as_millis_f64(self.total_backoff) / self.rejected as f64)
    }
}

/// Drive `limiter` at `options.qps` for `options.duration` of real time.
///
/// Pacing sleeps on the tokio timer while the deadline is read from the
/// limiter's clock, so the limiter must run on a clock that follows real time
/// such as [`MonotonicClock`](crate::MonotonicClock). A clock that does not
/// advance on its own, like a [`ManualClock`](crate::ManualClock), never
/// reaches the deadline.
///
/// Attempts are scheduled one interval apart. After a success the next
/// attempt is one interval later, with up to 50µs of extra jitter on every
/// 32nd success. After a rejection a polite client waits for the longer of
/// the interval and the retry hint; a hammering client waits one interval.
pub async fn steady_demo(limiter: &dyn RateLimiter, options: SteadyOptions) -> Result<SteadyReport> {
    let clock = limiter.clock();
    let interval_nanos = duration_to_nanos(options.interval());

    let start = clock.now_nanos();
    let deadline = start.saturating_add(duration_to_nanos(options.duration));

    let mut report = SteadyReport::new(limiter, &options);
    let mut total_sleep_nanos: i64 = 0;
    let mut next_attempt = start;

    info!(
        algorithm = limiter.name(),
        mode = %options.mode,
        qps = options.qps,
        duration = ?options.duration,
        "Starting steady demo"
    );

    loop {
        let now = clock.now_nanos();
        if now >= deadline {
            break;
        }

        if now < next_attempt {
            // Never sleep past the end of the run
            let sleep = next_attempt.min(deadline) - now;
            total_sleep_nanos = total_sleep_nanos.saturating_add(sleep);
            tokio::time::sleep(nanos_to_duration(sleep)).await;
            continue;
        }

        // Schedule from the later of now and the plan to avoid drift
        let base = now.max(next_attempt);

        match limiter.try_acquire_at(now, options.permits)? {
            AcquireResult::Acquired { .. } => {
                report.ok += 1;
                let jitter = if report.ok % JITTER_EVERY == 0 {
                    rand::thread_rng().gen_range(0..MAX_JITTER_NANOS)
                } else {
                    0
                };
                next_attempt = base.saturating_add(interval_nanos).saturating_add(jitter);
            }
            AcquireResult::Rejected { retry_after } => {
                report.rejected += 1;
                let after_desired = base.saturating_add(interval_nanos);

                if options.mode.respects_retry_after() {
                    report.total_backoff = report.total_backoff.saturating_add(retry_after);
                    report.max_backoff = report.max_backoff.max(retry_after);

                    let after_backoff = base.saturating_add(duration_to_nanos(retry_after));
                    if after_backoff > after_desired {
                        report.backoff_wins += 1;
                    }
                    next_attempt = after_desired.max(after_backoff);
                } else {
                    next_attempt = after_desired;
                }
            }
        }
    }

    report.elapsed = nanos_to_duration(clock.now_nanos().saturating_sub(start));
    report.total_pace_sleep = nanos_to_duration(total_sleep_nanos);

    debug!(
        ok = report.ok,
        rejected = report.rejected,
        elapsed = ?report.elapsed,
        "Steady demo finished"
    );
    Ok(report)
}

impl fmt::Display for SteadyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== steadyDemo ==")?;
        writeln!(f, "clientMode={}", self.mode)?;
        writeln!(
            f,
            "targetQps={} duration={} elapsed={}",
            self.target_qps,
            format_duration(self.duration),
            format_duration(self.elapsed)
        )?;
        writeln!(
            f,
            "total={} ok={} rejected={}",
            self.total(),
            self.ok,
            self.rejected
        )?;
        writeln!(
            f,
            "attemptQps={:.1} okQps={:.1} rejectRate={:.1}%",
            self.attempt_qps(),
            self.ok_qps(),
            self.reject_rate_percent()
        )?;
        write!(f, "avgPaceSleep(ms)={}", self.avg_pace_sleep_ms())?;

        if let Some(avg_backoff) = self.avg_backoff_ms() {
            write!(f, "\navgBackoff(ms)={}", avg_backoff)?;
            write!(f, "\nmaxBackoff(ms)={}", as_millis_f64(self.max_backoff))?;
            write!(f, "\nbackoffWins={}/{}", self.backoff_wins, self.rejected)?;
        }
        Ok(())
    }
}
