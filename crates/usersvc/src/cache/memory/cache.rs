//! In-memory cache implementation with LRU eviction.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use usersvc_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache with LRU eviction.
///
/// TTL expiry is lazy: an expired entry is dropped the next time it is read.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` keys. Zero is treated
    /// as one.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // LRU reads reorder entries, so even `get` takes the write lock.
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if entry.is_expired() => true,
            Some(entry) => return Ok(Some(entry.value.clone())),
            None => return Ok(None),
        };
        if expired {
            store.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(10);
        cache.set("user:1", b"ada", None).await.unwrap();

        assert_eq!(cache.get("user:1").await.unwrap(), Some(b"ada".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent_is_none() {
        let cache = MemoryCache::new(10);
        assert_eq!(cache.get("user:404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(10);
        cache.set("user:1", b"ada", None).await.unwrap();
        cache.delete("user:1").await.unwrap();
        cache.delete("user:1").await.unwrap();

        assert_eq!(cache.get("user:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let cache = MemoryCache::new(10);
        cache
            .set("user:1", b"ada", Some(Duration::from_millis(20)))
            .await
            .unwrap();
        assert!(cache.get("user:1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("user:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryCache::new(2);
        cache.set("user:1", b"1", None).await.unwrap();
        cache.set("user:2", b"2", None).await.unwrap();
        // Touch user:1 so user:2 becomes least recently used.
        cache.get("user:1").await.unwrap();
        cache.set("user:3", b"3", None).await.unwrap();

        assert!(cache.get("user:1").await.unwrap().is_some());
        assert!(cache.get("user:2").await.unwrap().is_none());
        assert!(cache.get("user:3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_still_caches_one() {
        let cache = MemoryCache::new(0);
        cache.set("user:1", b"1", None).await.unwrap();
        assert!(cache.get("user:1").await.unwrap().is_some());
    }
}
