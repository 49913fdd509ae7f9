use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Contact form: 10 submissions per minute per IP.
pub const CONTACT_CAP: u64 = 10;
pub const CONTACT_WINDOW: Duration = Duration::from_secs(60);

/// Login: 5 attempts per 15 minutes per IP.
pub const LOGIN_CAP: u64 = 5;
pub const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Fixed-window request limiter shared across handler threads, keyed by
/// (endpoint, ip_hash) so each guarded endpoint gets its own window per
/// caller. Counters live in process memory only and reset on restart.
pub struct RateLimiter {
    hits: Mutex<HashMap<(String, String), Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        RateLimiter {
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Purge hits older than `window` for this key, then admit the request
    /// iff fewer than `cap` remain. Admitted requests are recorded.
    pub fn allow(&self, endpoint: &str, ip: &str, cap: u64, window: Duration) -> bool {
        let mut map = self.hits.lock().unwrap();
        let now = Instant::now();
        let hits = map
            .entry((endpoint.to_string(), ip.to_string()))
            .or_default();
        hits.retain(|t| now.duration_since(*t) < window);
        if (hits.len() as u64) < cap {
            hits.push(now);
            true
        } else {
            false
        }
    }

    /// How many requests this key could still make without recording one.
    pub fn remaining(&self, endpoint: &str, ip: &str, cap: u64, window: Duration) -> u64 {
        let mut map = self.hits.lock().unwrap();
        let now = Instant::now();
        let hits = map
            .entry((endpoint.to_string(), ip.to_string()))
            .or_default();
        hits.retain(|t| now.duration_since(*t) < window);
        cap.saturating_sub(hits.len() as u64)
    }

    /// Drop keys whose every hit is older than `max_age`. Called from the
    /// background maintenance task.
    pub fn cleanup(&self, max_age: Duration) {
        let mut map = self.hits.lock().unwrap();
        let now = Instant::now();
        map.retain(|_, hits| {
            hits.retain(|t| now.duration_since(*t) < max_age);
            !hits.is_empty()
        });
    }
}
