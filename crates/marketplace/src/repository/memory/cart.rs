use super::{MemoryStore, now};
use crate::{
    abstract_trait::cart::CartStoreTrait,
    model::cart::{Cart, CartItem, CartLine},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

#[async_trait]
impl CartStoreTrait for MemoryStore {
    async fn get_or_create_cart(&self, user_id: i64) -> Result<Cart, RepositoryError> {
        let mut t = self.tables.lock().await;

        if let Some(cart) = t.carts.values().find(|c| c.user_id == user_id) {
            return Ok(cart.clone());
        }

        let id = t.next_id();
        let cart = Cart {
            id,
            user_id,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        t.carts.insert(id, cart.clone());
        Ok(cart)
    }

    async fn find_lines(&self, cart_id: i64) -> Result<Vec<CartLine>, RepositoryError> {
        let t = self.tables.lock().await;

        Ok(t.cart_items
            .values()
            .filter(|i| i.cart_id == cart_id)
            .filter_map(|item| {
                t.products.get(&item.product_id).map(|p| CartLine {
                    item_id: item.id,
                    product_id: p.id,
                    quantity: item.quantity,
                    product_name: p.name.clone(),
                    seller_id: p.seller_id,
                    price: p.price,
                    stock: p.stock,
                    active: p.active,
                    deleted: p.deleted_at.is_some(),
                })
            })
            .collect())
    }

    async fn find_item(&self, item_id: i64) -> Result<Option<CartItem>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.cart_items.get(&item_id).cloned())
    }

    async fn find_item_by_product(
        &self,
        cart_id: i64,
        product_id: i64,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.cart_items
            .values()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
            .cloned())
    }

    async fn upsert_item(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut t = self.tables.lock().await;

        if let Some(item) = t
            .cart_items
            .values_mut()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
        {
            item.quantity = quantity;
            item.updated_at = Some(now());
            return Ok(item.clone());
        }

        let id = t.next_id();
        let item = CartItem {
            id,
            cart_id,
            product_id,
            quantity,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        t.cart_items.insert(id, item.clone());
        Ok(item)
    }

    async fn set_quantity(&self, item_id: i64, quantity: i32) -> Result<CartItem, RepositoryError> {
        let mut t = self.tables.lock().await;
        let item = t
            .cart_items
            .get_mut(&item_id)
            .ok_or(RepositoryError::NotFound)?;
        item.quantity = quantity;
        item.updated_at = Some(now());
        Ok(item.clone())
    }

    async fn delete_items(&self, item_ids: &[i64]) -> Result<u64, RepositoryError> {
        let mut t = self.tables.lock().await;
        let mut removed = 0;
        for id in item_ids {
            if t.cart_items.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn clear_cart(&self, cart_id: i64) -> Result<u64, RepositoryError> {
        let mut t = self.tables.lock().await;
        let before = t.cart_items.len();
        t.cart_items.retain(|_, i| i.cart_id != cart_id);
        Ok((before - t.cart_items.len()) as u64)
    }
}
