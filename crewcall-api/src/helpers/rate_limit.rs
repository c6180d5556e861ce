use crate::helpers::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

struct WindowEntry {
    window_start: DateTime<Utc>,
    count: u32,
}

/// Fixed-window request limiter keyed by client. Entries for idle clients
/// are dropped by the periodic sweep so the map cannot grow without bound.
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new(window_seconds: i64, max_requests: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            window: Duration::seconds(window_seconds),
            max_requests,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request for `key` and report whether it is allowed.
    pub async fn check(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        let entry = entries.entry(key.to_string()).or_insert(WindowEntry {
            window_start: now,
            count: 0,
        });

        if now - entry.window_start >= self.window {
            entry.window_start = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }

    /// Drop every entry whose window has already passed.
    pub async fn sweep(&self) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| now - entry.window_start < self.window);
    }

    #[cfg(test)]
    pub async fn tracked_clients(&self) -> usize {
        self.entries.lock().await.len()
    }
}
