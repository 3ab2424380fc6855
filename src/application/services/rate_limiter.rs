//! Per-client token-bucket admission control.
//!
//! Each client key owns a [`ClientBucket`] that refills continuously at
//! `refill_rate` tokens per second up to `burst_capacity`. Admission costs one token.
//!
//! All buckets live in one table behind a single mutex. Both admission checks and the
//! periodic eviction sweep take that lock, and only for the duration of the table
//! mutation, never across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Limiter parameters. Fixed for the lifetime of the limiter.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimiterConfig {
    /// Tokens added per second.
    pub refill_rate: f64,
    /// Maximum tokens a bucket can hold (and its initial fill).
    pub burst_capacity: u32,
    /// When false every request is admitted and no state is kept.
    pub enabled: bool,
}

/// Token state of one client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientBucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl ClientBucket {
    fn full(capacity: f64, now: Instant) -> Self {
        Self {
            tokens: capacity,
            last_refill: now,
            last_seen: now,
        }
    }

    fn try_acquire(&mut self, now: Instant, refill_rate: f64, capacity: f64) -> bool {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_refill = self.last_refill.max(now);
        self.last_seen = self.last_seen.max(now);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub fn tokens(&self) -> f64 {
        self.tokens
    }

    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }
}

/// Process-local client table with token-bucket admission.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    clients: Mutex<HashMap<String, ClientBucket>>,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Decides whether `client_key` may make a request now.
    pub fn admit(&self, client_key: &str) -> bool {
        self.admit_at(client_key, Instant::now())
    }

    /// Same as [`RateLimiter::admit`] with an explicit clock reading.
    ///
    /// Creates a full bucket for unknown keys. `last_seen` is refreshed whether or
    /// not the request is admitted.
    pub fn admit_at(&self, client_key: &str, now: Instant) -> bool {
        if !self.config.enabled {
            return true;
        }

        let capacity = f64::from(self.config.burst_capacity);
        let mut clients = self.lock();
        let bucket = clients
            .entry(client_key.to_string())
            .or_insert_with(|| ClientBucket::full(capacity, now));

        bucket.try_acquire(now, self.config.refill_rate, capacity)
    }

    /// Removes every bucket not seen for longer than `stale_after`.
    ///
    /// Returns the number of evicted clients.
    pub fn sweep(&self, stale_after: Duration) -> usize {
        self.sweep_at(Instant::now(), stale_after)
    }

    pub fn sweep_at(&self, now: Instant, stale_after: Duration) -> usize {
        let mut clients = self.lock();
        let before = clients.len();
        clients.retain(|_, bucket| now.saturating_duration_since(bucket.last_seen) <= stale_after);
        before - clients.len()
    }

    /// Snapshot of a client's bucket.
    pub fn bucket(&self, client_key: &str) -> Option<ClientBucket> {
        self.lock().get(client_key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a bucket half-written in a way that
    // breaks the clamping invariants, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, ClientBucket>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Spawns the periodic eviction sweep.
///
/// The first sweep runs one `interval` after spawning. The task runs until aborted.
pub fn spawn_sweeper(
    limiter: Arc<RateLimiter>,
    interval: Duration,
    stale_after: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let evicted = limiter.sweep(stale_after);
            if evicted > 0 {
                tracing::debug!(evicted, remaining = limiter.len(), "rate limiter sweep");
            }
        }
    })
}
