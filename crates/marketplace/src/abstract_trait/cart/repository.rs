use crate::model::cart::{Cart, CartItem, CartLine};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCartStore = Arc<dyn CartStoreTrait + Send + Sync>;

#[async_trait]
pub trait CartStoreTrait {
    async fn get_or_create_cart(&self, user_id: i64) -> Result<Cart, RepositoryError>;
    /// Items joined with their product, including inactive and deleted ones.
    async fn find_lines(&self, cart_id: i64) -> Result<Vec<CartLine>, RepositoryError>;
    async fn find_item(&self, item_id: i64) -> Result<Option<CartItem>, RepositoryError>;
    async fn find_item_by_product(
        &self,
        cart_id: i64,
        product_id: i64,
    ) -> Result<Option<CartItem>, RepositoryError>;
    /// Inserts the line or overwrites the quantity of the existing one.
    async fn upsert_item(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError>;
    async fn set_quantity(&self, item_id: i64, quantity: i32) -> Result<CartItem, RepositoryError>;
    async fn delete_items(&self, item_ids: &[i64]) -> Result<u64, RepositoryError>;
    async fn clear_cart(&self, cart_id: i64) -> Result<u64, RepositoryError>;
}
