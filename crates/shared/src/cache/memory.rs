use crate::{abstract_trait::CacheBackendTrait, errors::CacheError};
use async_trait::async_trait;
use std::{collections::HashMap, time::Duration};
use tokio::{sync::Mutex, time::Instant};

/// Process-local backend used when no Redis is configured and in tests.
#[derive(Default)]
pub struct MemoryCacheBackend {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackendTrait for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_secs);
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = MemoryCacheBackend::new();
        cache.set("cart:1", "{}", 30).await.unwrap();

        assert_eq!(cache.get("cart:1").await.unwrap().as_deref(), Some("{}"));

        tokio::time::advance(Duration::from_secs(31)).await;

        assert_eq!(cache.get("cart:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let cache = MemoryCacheBackend::new();
        cache.set("cart:2", "[]", 60).await.unwrap();
        cache.delete("cart:2").await.unwrap();

        assert_eq!(cache.get("cart:2").await.unwrap(), None);
    }
}
