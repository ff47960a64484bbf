//! Per-user token bucket rate limiter for generation-request creation.
//!
//! Buckets refill continuously at `rate` tokens per second up to `capacity`.
//! The map is unbounded between purges; a periodic [`RateLimiter::purge_stale`]
//! keeps it from growing with dead users.

use std::collections::HashMap;
use std::time::Instant;

use fiszki_core::types::DbId;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_refill: Instant::now(),
        }
    }

    fn try_consume(&mut self, rate: f64, capacity: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.last_refill = now;

        self.tokens = (self.tokens + elapsed * rate).min(capacity);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Token bucket limiter keyed by user id.
pub struct RateLimiter {
    buckets: Mutex<HashMap<DbId, TokenBucket>>,
    /// Refill rate in tokens per second.
    rate: f64,
    capacity: f64,
}

impl RateLimiter {
    /// Build a limiter from a per-minute rate and a burst capacity.
    pub fn per_minute(rate_per_min: f64, capacity: f64) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            rate: rate_per_min / 60.0,
            capacity,
        }
    }

    /// Consume one token for the user. Returns `false` when over the limit.
    pub async fn check(&self, user_id: DbId) -> bool {
        let mut buckets = self.buckets.lock().await;
        let bucket = buckets
            .entry(user_id)
            .or_insert_with(|| TokenBucket::new(self.capacity));
        bucket.try_consume(self.rate, self.capacity)
    }

    /// Drop buckets that have been idle longer than `max_idle_secs`.
    pub async fn purge_stale(&self, max_idle_secs: f64) {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        buckets.retain(|_, bucket| {
            now.duration_since(bucket.last_refill).as_secs_f64() < max_idle_secs
        });
    }
}
