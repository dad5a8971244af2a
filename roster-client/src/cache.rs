//! Response cache
//!
//! Process-lifetime key → (value, timestamp) cache. Nothing goes
//! through it implicitly; callers opt in per call site. Entries older
//! than the freshness window are treated as absent and overwritten on
//! the next put.

use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Default freshness window
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Concurrent response cache with a fixed freshness window
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, (Value, Instant)>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fresh value for the key, or `None` if absent or stale
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        let (value, stored_at) = entry.value();
        if stored_at.elapsed() < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), (value, Instant::now()));
    }

    /// Drop a single key, e.g. after a mutation invalidates it
    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
