use crate::{
    abstract_trait::cart::CartStoreTrait,
    model::cart::{Cart, CartItem, CartLine},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStoreTrait for CartRepository {
    async fn get_or_create_cart(&self, user_id: i64) -> Result<Cart, RepositoryError> {
        sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts (user_id, created_at, updated_at)
            VALUES ($1, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load cart for user {user_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_lines(&self, cart_id: i64) -> Result<Vec<CartLine>, RepositoryError> {
        sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.id AS item_id,
                   ci.product_id,
                   ci.quantity,
                   p.name AS product_name,
                   p.seller_id,
                   p.price,
                   p.stock,
                   p.active,
                   (p.deleted_at IS NOT NULL) AS deleted
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id ASC
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch lines of cart {cart_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_item(&self, item_id: i64) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE id = $1")
            .bind(item_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch cart item {item_id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_item_by_product(
        &self,
        cart_id: i64,
        product_id: i64,
    ) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch cart item for product {product_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn upsert_item(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = EXCLUDED.quantity, updated_at = CURRENT_TIMESTAMP
            RETURNING *
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to upsert product {product_id} in cart {cart_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🛒 Cart {cart_id} now holds {} x product {product_id}", item.quantity);
        Ok(item)
    }

    async fn set_quantity(&self, item_id: i64, quantity: i32) -> Result<CartItem, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update cart item {item_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn delete_items(&self, item_ids: &[i64]) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = ANY($1)")
            .bind(item_ids)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete cart items {item_ids:?}: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected())
    }

    async fn clear_cart(&self, cart_id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to clear cart {cart_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("🧹 Cleared {} items from cart {cart_id}", result.rows_affected());
        Ok(result.rows_affected())
    }
}
