use super::{Counted, split_counted};
use crate::{
    abstract_trait::order::{CheckoutOutcome, OrderStoreTrait},
    domain::{
        checkout::{ORDER_NUMBER_ATTEMPTS, RequestedLine, generate_order_number, plan_checkout},
        enums::OrderStatus,
        requests::order::{OrderListQuery, PlaceOrderRecord, StatusChangeRecord},
    },
    model::{
        order::{Order, OrderItem, OrderItemContext},
        product::Product,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct OrderRepository {
    db: ConnectionPool,
}

impl OrderRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn list(
        &self,
        scope: &str,
        owner_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let sql = format!(
            r#"
            SELECT o.*, COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE {scope}
              AND ($2::TEXT IS NULL OR o.status = $2)
            ORDER BY {column} {direction}, o.id {direction}
            LIMIT $3 OFFSET $4
            "#,
            column = query.sort_by.column(),
            direction = query.sort_direction.sql(),
        );

        let rows = sqlx::query_as::<_, Counted<Order>>(&sql)
            .bind(owner_id)
            .bind(query.status)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch orders for {owner_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(split_counted(rows))
    }
}

async fn unique_order_number(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<String, RepositoryError> {
    let today = Utc::now().date_naive();

    for _ in 0..ORDER_NUMBER_ATTEMPTS {
        let candidate = generate_order_number(today)
            .map_err(|e| RepositoryError::Custom(e.to_string()))?;

        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM orders WHERE order_number = $1)")
                .bind(&candidate)
                .fetch_one(&mut **tx)
                .await?;

        if !taken {
            return Ok(candidate);
        }
        warn!("⚠️ Order number {candidate} already taken, retrying");
    }

    Err(RepositoryError::Custom(
        "could not allocate a unique order number".into(),
    ))
}

#[async_trait]
impl OrderStoreTrait for OrderRepository {
    async fn place_order(
        &self,
        record: &PlaceOrderRecord,
    ) -> Result<CheckoutOutcome, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin checkout transaction: {e:?}");
            RepositoryError::from(e)
        })?;

        let cart_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM carts WHERE user_id = $1 FOR UPDATE")
                .bind(record.buyer_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(cart_id) = cart_id else {
            return Ok(CheckoutOutcome::EmptyCart);
        };

        let requested: Vec<RequestedLine> = sqlx::query_as::<_, (i64, i32)>(
            "SELECT product_id, quantity FROM cart_items WHERE cart_id = $1 ORDER BY product_id",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(product_id, quantity)| RequestedLine {
            product_id,
            quantity,
        })
        .collect();

        if requested.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let product_ids: Vec<i64> = requested.iter().map(|l| l.product_id).collect();

        // Locks are taken in id order so concurrent checkouts cannot deadlock.
        let products: HashMap<i64, Product> = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

        let plan = match plan_checkout(
            &requested,
            &products,
            record.shipping_cost,
            record.tax_rate,
        ) {
            Ok(plan) => plan,
            Err(violations) => {
                tx.rollback().await?;
                info!(
                    "🚫 Checkout for buyer {} rejected: {} invalid items",
                    record.buyer_id,
                    violations.len()
                );
                return Ok(CheckoutOutcome::Rejected(violations));
            }
        };

        let order_number = unique_order_number(&mut tx).await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                order_number, buyer_id, status, payment_status, payment_method,
                address_id, shipping_address, shipping_method, shipping_cost, subtotal, tax,
                total, notes, created_at, updated_at
            )
            VALUES ($1, $2, 'waiting', 'waiting', $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(&order_number)
        .bind(record.buyer_id)
        .bind(&record.payment_method)
        .bind(record.address_id)
        .bind(&record.shipping_address)
        .bind(&record.shipping_method)
        .bind(plan.shipping_cost)
        .bind(plan.subtotal)
        .bind(plan.tax)
        .bind(plan.total)
        .bind(&record.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert order {order_number}: {e:?}");
            RepositoryError::from(e)
        })?;

        let mut items = Vec::with_capacity(plan.lines.len());
        for line in &plan.lines {
            let item = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (
                    order_id, product_id, seller_id, product_name, price, quantity, subtotal,
                    created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, CURRENT_TIMESTAMP)
                RETURNING *
                "#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.seller_id)
            .bind(&line.product_name)
            .bind(line.price)
            .bind(line.quantity)
            .bind(line.subtotal)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE products SET stock = stock - $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            items.push(item);
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit checkout {order_number}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!(
            "✅ Placed order {} for buyer {} ({} items, total {})",
            order.order_number,
            order.buyer_id,
            items.len(),
            order.total
        );
        Ok(CheckoutOutcome::Placed { order, items })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, RepositoryError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_items(&self, order_id: i64) -> Result<Vec<OrderItem>, RepositoryError> {
        sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items of order {order_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_buyer(
        &self,
        buyer_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        self.list("o.buyer_id = $1", buyer_id, query).await
    }

    async fn find_by_seller(
        &self,
        seller_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        self.list(
            "EXISTS (SELECT 1 FROM order_items oi WHERE oi.order_id = o.id AND oi.seller_id = $1)",
            seller_id,
            query,
        )
        .await
    }

    async fn change_status(
        &self,
        change: &StatusChangeRecord,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.db.begin().await?;

        let current: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(change.order_id)
                .fetch_optional(&mut *tx)
                .await?;

        if current != Some(change.expected) {
            tx.rollback().await?;
            return Ok(None);
        }

        if change.restocks() {
            let returned = sqlx::query_as::<_, (i64, i32)>(
                "SELECT product_id, quantity FROM order_items WHERE order_id = $1 ORDER BY product_id",
            )
            .bind(change.order_id)
            .fetch_all(&mut *tx)
            .await?;

            let product_ids: Vec<i64> = returned.iter().map(|(id, _)| *id).collect();
            sqlx::query("SELECT id FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE")
                .bind(&product_ids)
                .execute(&mut *tx)
                .await?;

            for (product_id, quantity) in &returned {
                sqlx::query(
                    "UPDATE products SET stock = stock + $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
                )
                .bind(quantity)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2::TEXT,
                payment_status = COALESCE($3::TEXT, payment_status),
                canceled_at = CASE WHEN $2::TEXT = 'canceled' THEN CURRENT_TIMESTAMP ELSE canceled_at END,
                completed_at = CASE WHEN $2::TEXT = 'completed' THEN CURRENT_TIMESTAMP ELSE completed_at END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(change.order_id)
        .bind(change.next)
        .bind(change.payment_status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit status change of order {}: {e:?}", change.order_id);
            RepositoryError::from(e)
        })?;

        info!(
            "🔄 Order {} moved {} -> {}",
            order.id, change.expected, order.status
        );
        Ok(Some(order))
    }

    async fn record_payment(
        &self,
        order_id: i64,
        reference: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET payment_status = 'paid',
                payment_reference = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND payment_status = 'waiting' AND status <> 'canceled'
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(reference)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to record payment for order {order_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_item_context(
        &self,
        item_id: i64,
    ) -> Result<Option<OrderItemContext>, RepositoryError> {
        sqlx::query_as::<_, OrderItemContext>(
            r#"
            SELECT oi.id AS item_id,
                   oi.order_id,
                   oi.product_id,
                   oi.seller_id,
                   o.buyer_id,
                   o.status AS order_status
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE oi.id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order item {item_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
