//! Per-key limiter registry
//!
//! Keeps one independent limiter per key (client id, IP, API key, ...) built
//! from a shared configuration.

use super::clock::{Clock, MonotonicClock};
use super::limiter::RateLimiter;
use super::types::AcquireResult;
use super::utils::duration_to_nanos;
use crate::config::models::rate_limit::RateLimitConfig;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Limiter entry for one key
#[derive(Debug)]
struct KeyedEntry {
    limiter: Arc<dyn RateLimiter>,
    /// Clock reading of the last call that touched this key
    last_seen: i64,
}

/// Rate limiter keyed by caller identity
#[derive(Debug)]
pub struct KeyedRateLimiter {
    /// Rate limit configuration
    config: RateLimitConfig,
    /// Limiters by key
    entries: Arc<RwLock<HashMap<String, KeyedEntry>>>,
    /// Clock shared with every limiter created by the registry
    clock: Arc<dyn Clock>,
}

impl KeyedRateLimiter {
    /// Create a new registry
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot produce a limiter.
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        // Surface parameter errors at construction instead of on first use
        config.build()?;

        Ok(Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(MonotonicClock),
        })
    }

    /// Replace the clock used for every key
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Limiter for `key`, created on first use
    async fn limiter_for(&self, key: &str, now: i64) -> Result<Arc<dyn RateLimiter>> {
        let mut entries = self.entries.write().await;
        // Avoid String allocation if key already exists
        if let Some(entry) = entries.get_mut(key) {
            entry.last_seen = entry.last_seen.max(now);
            return Ok(Arc::clone(&entry.limiter));
        }

        let limiter = self.config.build_with_clock(Arc::clone(&self.clock))?;
        debug!(key, algorithm = limiter.name(), "Created limiter for key");
        entries.insert(
            key.to_string(),
            KeyedEntry {
                limiter: Arc::clone(&limiter),
                last_seen: now,
            },
        );
        Ok(limiter)
    }

    /// Atomically acquire `permits` for `key`
    pub async fn try_acquire(&self, key: &str, permits: u64) -> Result<AcquireResult> {
        if !self.config.enabled {
            return Ok(AcquireResult::Acquired { permits });
        }

        let now = self.clock.now_nanos();
        let limiter = self.limiter_for(key, now).await?;
        let result = limiter.try_acquire_at(now, permits)?;

        if !result.is_acquired() {
            debug!(
                "Rate limit exceeded for {}: retry after {:?}",
                key,
                result.retry_after()
            );
        }
        Ok(result)
    }

    /// Permits currently available for `key`
    pub async fn available_tokens(&self, key: &str) -> Result<u64> {
        if !self.config.enabled {
            return Ok(self.config.capacity);
        }

        let now = self.clock.now_nanos();
        let limiter = self.limiter_for(key, now).await?;
        Ok(limiter.available_tokens_at(now))
    }

    /// Delay before `permits` may be acquired for `key`
    pub async fn retry_after(&self, key: &str, permits: u64) -> Result<Duration> {
        if !self.config.enabled {
            return Ok(Duration::ZERO);
        }

        let now = self.clock.now_nanos();
        let limiter = self.limiter_for(key, now).await?;
        limiter.retry_after_at(now, permits)
    }

    /// Drop keys that have not been touched for longer than `idle`.
    /// Returns the number of keys removed.
    pub async fn cleanup(&self, idle: Duration) -> usize {
        let cutoff = self
            .clock
            .now_nanos()
            .saturating_sub(duration_to_nanos(idle));

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.last_seen >= cutoff);
        let removed = before - entries.len();

        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Cleaned up idle limiters");
        }
        removed
    }

    /// Start background cleanup task that drops keys idle for one `every` period
    pub fn start_cleanup_task(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                self.cleanup(every).await;
            }
        })
    }

    /// Number of keys currently tracked
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no key is tracked
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the configuration
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl Clone for KeyedRateLimiter {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            entries: Arc::clone(&self.entries),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Global rate limiter singleton
static GLOBAL_RATE_LIMITER: std::sync::OnceLock<Arc<KeyedRateLimiter>> =
    std::sync::OnceLock::new();

/// Initialize the global rate limiter and start its cleanup task.
///
/// Must be called from within a tokio runtime. Later calls return the
/// limiter created by the first one.
pub fn init_global_rate_limiter(
    config: RateLimitConfig,
    cleanup_every: Duration,
) -> Result<Arc<KeyedRateLimiter>> {
    if let Some(existing) = GLOBAL_RATE_LIMITER.get() {
        return Ok(Arc::clone(existing));
    }

    let limiter = Arc::new(KeyedRateLimiter::new(config)?);
    if GLOBAL_RATE_LIMITER.set(Arc::clone(&limiter)).is_err() {
        // Lost a race with another initializer
        return Ok(GLOBAL_RATE_LIMITER.get().map(Arc::clone).unwrap_or(limiter));
    }

    info!(
        strategy = ?limiter.config().strategy,
        "Global rate limiter initialized"
    );
    let _cleanup = Arc::clone(&limiter).start_cleanup_task(cleanup_every);
    Ok(limiter)
}

/// Get the global rate limiter
pub fn get_global_rate_limiter() -> Option<Arc<KeyedRateLimiter>> {
    GLOBAL_RATE_LIMITER.get().cloned()
}
