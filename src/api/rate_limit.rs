//! Token bucket rate limiting, keyed by client IP

use crate::Error;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// A simple token bucket
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
        }
    }

    fn try_acquire(&mut self, capacity: f64, refill_rate: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Per-client token buckets; one instance per protected surface
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    capacity: f64,
    refill_rate: f64,
}

impl RateLimiter {
    /// `burst` requests allowed immediately, refilled evenly over
    /// `window_secs`
    pub fn new(burst: u32, window_secs: u64) -> Self {
        let capacity = f64::from(burst.max(1));
        Self {
            buckets: Mutex::new(HashMap::new()),
            capacity,
            refill_rate: capacity / (window_secs.max(1) as f64),
        }
    }

    pub fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock();
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.capacity));
        bucket.try_acquire(self.capacity, self.refill_rate)
    }
}

/// Middleware enforcing the limiter it was built with
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    // Connect info is absent when the router is exercised directly in
    // tests; everything then shares one bucket
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "local".to_string());

    if limiter.check(&key) {
        Ok(next.run(request).await)
    } else {
        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        Err(Error::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_is_allowed_then_blocked() {
        let limiter = RateLimiter::new(3, 900);
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn test_clients_have_independent_buckets() {
        let limiter = RateLimiter::new(1, 900);
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn test_bucket_refills_over_time() {
        let mut bucket = TokenBucket::new(1.0);
        assert!(bucket.try_acquire(1.0, 100.0));
        assert!(!bucket.try_acquire(1.0, 100.0));
        // Backdate the bucket instead of sleeping
        bucket.last_update = Instant::now() - std::time::Duration::from_millis(100);
        assert!(bucket.try_acquire(1.0, 100.0));
    }
}
