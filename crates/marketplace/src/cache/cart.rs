use crate::domain::response::cart::CartResponse;
use chrono::Duration;
use shared::cache::CacheStore;
use std::sync::Arc;
use tracing::debug;

/// Read-through view of a user's cart, keyed `cart:{user_id}`.
///
/// Entries are never patched in place: every cart mutation and every
/// checkout drops the key, and the next read rebuilds it from the store.
#[derive(Clone)]
pub struct CartCache {
    store: Arc<CacheStore>,
    ttl: Duration,
}

impl CartCache {
    pub fn new(store: Arc<CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn key(user_id: i64) -> String {
        format!("cart:{user_id}")
    }

    pub async fn get(&self, user_id: i64) -> Option<CartResponse> {
        self.store
            .get_json::<CartResponse>(&Self::key(user_id))
            .await
    }

    pub async fn put(&self, user_id: i64, cart: &CartResponse) {
        self.store
            .put_json(&Self::key(user_id), cart, self.ttl)
            .await;
    }

    pub async fn invalidate(&self, user_id: i64) {
        debug!("🧹 Invalidating cart cache for user {user_id}");
        self.store.evict(&Self::key(user_id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{abstract_trait::DynCacheBackend, cache::MemoryCacheBackend};

    fn cache() -> CartCache {
        let backend: DynCacheBackend = Arc::new(MemoryCacheBackend::new());
        CartCache::new(Arc::new(CacheStore::new(backend)), Duration::seconds(60))
    }

    fn empty_cart(cart_id: i64) -> CartResponse {
        CartResponse::build(cart_id, vec![], vec![])
    }

    #[tokio::test]
    async fn stores_per_user_and_invalidates() {
        let cache = cache();
        cache.put(7, &empty_cart(70)).await;
        cache.put(8, &empty_cart(80)).await;

        let hit = cache.get(7).await.expect("cached cart");
        assert_eq!(hit.cart_id, 70);
        assert_eq!(hit.total_price, Decimal::ZERO);

        cache.invalidate(7).await;
        assert!(cache.get(7).await.is_none());
        assert_eq!(cache.get(8).await.map(|c| c.cart_id), Some(80));
    }

    #[test]
    fn key_is_namespaced_by_user() {
        assert_eq!(CartCache::key(42), "cart:42");
    }
}
