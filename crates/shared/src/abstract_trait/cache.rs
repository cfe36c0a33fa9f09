use crate::errors::CacheError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCacheBackend = Arc<dyn CacheBackendTrait + Send + Sync>;

/// Raw string key/value storage with per-key expiry.
#[async_trait]
pub trait CacheBackendTrait: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
