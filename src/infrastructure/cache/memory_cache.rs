//! In-process TTL cache with a fixed capacity.

use super::service::{CacheResult, VerdictCache};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// A bounded map whose entries expire after a TTL.
///
/// When full, expired entries are purged first; if none are expired, the
/// entry closest to expiry is evicted.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    capacity: usize,
    default_ttl: Duration,
}

impl MemoryCache {
    pub fn new(capacity: usize, default_ttl_seconds: u64) -> Self {
        debug!(
            "Using in-memory verdict cache (capacity {}, TTL {}s)",
            capacity, default_ttl_seconds
        );
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Number of live entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn make_room(entries: &mut HashMap<String, Entry>, capacity: usize, now: Instant) {
        if entries.len() < capacity {
            return;
        }

        entries.retain(|_, entry| entry.expires_at > now);

        while entries.len() >= capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone());

            match oldest {
                Some(key) => {
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl VerdictCache for MemoryCache {
    async fn get_verdict(&self, key: &str) -> CacheResult<Option<String>> {
        let Ok(mut entries) = self.entries.lock() else {
            return Ok(None);
        };

        let now = Instant::now();
        let found = entries
            .get(key)
            .map(|entry| (entry.expires_at > now, entry.value.clone()));

        match found {
            Some((true, value)) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            Some((false, _)) => {
                entries.remove(key);
                debug!("Cache EXPIRED: {}", key);
                Ok(None)
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set_verdict(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds
            .map(Duration::from_secs)
            .unwrap_or(self.default_ttl);

        let Ok(mut entries) = self.entries.lock() else {
            return Ok(());
        };

        let now = Instant::now();
        if !entries.contains_key(key) {
            Self::make_room(&mut entries, self.capacity, now);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> bool {
        self.entries.lock().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new(10, 60);
        cache.set_verdict("slug:promo", "allowed", None).await.unwrap();

        assert_eq!(
            cache.get_verdict("slug:promo").await.unwrap().as_deref(),
            Some("allowed")
        );
        assert!(cache.get_verdict("slug:other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let cache = MemoryCache::new(10, 60);
        cache.set_verdict("k", "v", Some(0)).await.unwrap();

        assert!(cache.get_verdict("k").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        let cache = MemoryCache::new(2, 60);
        cache.set_verdict("a", "1", Some(10)).await.unwrap();
        cache.set_verdict("b", "2", Some(100)).await.unwrap();
        cache.set_verdict("c", "3", Some(100)).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get_verdict("a").await.unwrap().is_none());
        assert!(cache.get_verdict("b").await.unwrap().is_some());
        assert!(cache.get_verdict("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_does_not_evict() {
        let cache = MemoryCache::new(2, 60);
        cache.set_verdict("a", "1", None).await.unwrap();
        cache.set_verdict("b", "2", None).await.unwrap();
        cache.set_verdict("a", "3", None).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_verdict("a").await.unwrap().as_deref(), Some("3"));
        assert!(cache.get_verdict("b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_health_and_backend() {
        let cache = MemoryCache::new(1, 1);
        assert!(cache.health_check().await);
        assert_eq!(cache.backend(), "memory");
    }
}
