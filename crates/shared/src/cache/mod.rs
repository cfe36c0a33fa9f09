mod cache_store;
mod memory;
mod redis;

pub use self::cache_store::CacheStore;
pub use self::memory::MemoryCacheBackend;
pub use self::redis::RedisCacheBackend;
