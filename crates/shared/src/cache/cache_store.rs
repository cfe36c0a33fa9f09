use crate::abstract_trait::DynCacheBackend;
use chrono::Duration;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, warn};

/// JSON values over a raw backend, every key prefixed with the store's
/// namespace. Backend and codec failures are logged and read as a miss.
#[derive(Clone)]
pub struct CacheStore {
    backend: DynCacheBackend,
    namespace: String,
}

impl CacheStore {
    pub fn new(backend: DynCacheBackend) -> Self {
        Self::namespaced(backend, "")
    }

    pub fn namespaced(backend: DynCacheBackend, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    fn full_key(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{key}", self.namespace)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let key = self.full_key(key);
        let raw = match self.backend.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Cache miss: {key}");
                return None;
            }
            Err(e) => {
                error!("Cache read failed for '{key}': {e}");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|e| warn!("Dropping undecodable cache entry '{key}': {e}"))
            .ok()
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let key = self.full_key(key);
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Cache encode failed for '{key}': {e}");
                return;
            }
        };

        // sub-second TTLs would expire on write
        let ttl_secs = ttl.num_seconds().max(1) as u64;
        match self.backend.set(&key, &raw, ttl_secs).await {
            Ok(()) => debug!("Cached '{key}' for {ttl_secs}s"),
            Err(e) => error!("Cache write failed for '{key}': {e}"),
        }
    }

    pub async fn evict(&self, key: &str) {
        let key = self.full_key(key);
        if let Err(e) = self.backend.delete(&key).await {
            error!("Cache evict failed for '{key}': {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn namespaced_keys_do_not_collide() {
        let backend: DynCacheBackend = Arc::new(MemoryCacheBackend::new());
        let a = CacheStore::namespaced(backend.clone(), "a");
        let b = CacheStore::namespaced(backend, "b");

        a.put_json("k", &1_i32, Duration::seconds(30)).await;
        assert_eq!(a.get_json::<i32>("k").await, Some(1));
        assert_eq!(b.get_json::<i32>("k").await, None);

        a.evict("k").await;
        assert_eq!(a.get_json::<i32>("k").await, None);
    }

    #[tokio::test]
    async fn undecodable_entry_reads_as_miss() {
        let backend: DynCacheBackend = Arc::new(MemoryCacheBackend::new());
        let store = CacheStore::new(backend);
        store.put_json("k", &"text", Duration::seconds(30)).await;
        assert_eq!(store.get_json::<i64>("k").await, None);
    }
}
