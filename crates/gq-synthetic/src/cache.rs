//! Engine-result cache with a fixed TTL.
//!
//! Owned by whoever composes the application (typically held in an `Arc`
//! inside the API state) and passed to the components that need it. There
//! is no process-wide instance.
//!
//! Last write wins and an expired entry reads as a miss. Every write also
//! drops expired entries, so the map is bounded by the keys written within
//! one TTL. There are no transactions across keys.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default time-to-live for cached engine results.
pub const DEFAULT_ENGINE_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CachedEntry {
    value: Value,
    stored_at: Instant,
}

/// Last-write-wins map from engine key to its latest result.
#[derive(Debug)]
pub struct EngineCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedEntry>>,
}

impl Default for EngineCache {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_CACHE_TTL)
    }
}

impl EngineCache {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Latest value for `engine`, or `None` if absent or expired.
    pub async fn get(&self, engine: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(engine)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` for `engine`, replacing any previous entry and
    /// dropping expired ones.
    pub async fn set(&self, engine: impl Into<String>, value: Value) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            engine.into(),
            CachedEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Drop expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = EngineCache::default();
        cache.set("risk", json!({"score": 42})).await;
        assert_eq!(cache.get("risk").await, Some(json!({"score": 42})));
        assert_eq!(cache.get("whales").await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = EngineCache::default();
        cache.set("risk", json!(1)).await;
        cache.set("risk", json!(2)).await;
        assert_eq!(cache.get("risk").await, Some(json!(2)));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = EngineCache::new(Duration::from_millis(20));
        cache.set("risk", json!(1)).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("risk").await, None);
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entries_do_not_accumulate() {
        let cache = EngineCache::new(Duration::from_millis(20));
        for entity in ["0xa", "0xb", "0xc", "0xd"] {
            cache.set(format!("risk:{}", entity), json!(1)).await;
        }
        assert_eq!(cache.len().await, 4);

        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.set("risk:0xe", json!(2)).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("risk:0xe").await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_zero_ttl_never_hits() {
        let cache = EngineCache::new(Duration::ZERO);
        cache.set("risk", json!(1)).await;
        assert_eq!(cache.get("risk").await, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = EngineCache::default();
        cache.set("a", json!(1)).await;
        cache.set("b", json!(2)).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
