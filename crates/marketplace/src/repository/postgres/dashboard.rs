use crate::{
    abstract_trait::dashboard::DashboardStoreTrait,
    model::{
        appointment::Appointment,
        dashboard::{DailySales, SellerOrderLine, SellerTotals, StatusCount},
        review::RatingCount,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct DashboardRepository {
    db: ConnectionPool,
}

impl DashboardRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DashboardStoreTrait for DashboardRepository {
    async fn seller_totals(&self, seller_id: i64) -> Result<SellerTotals, RepositoryError> {
        sqlx::query_as::<_, SellerTotals>(
            r#"
            SELECT
                (SELECT COALESCE(SUM(oi.subtotal), 0)
                   FROM order_items oi
                   JOIN orders o ON o.id = oi.order_id
                  WHERE oi.seller_id = $1 AND o.payment_status = 'paid') AS total_revenue,
                (SELECT COUNT(DISTINCT oi.order_id)
                   FROM order_items oi
                  WHERE oi.seller_id = $1) AS order_count,
                (SELECT COUNT(*)
                   FROM products p
                  WHERE p.seller_id = $1 AND p.deleted_at IS NULL) AS product_count,
                (SELECT COUNT(*)
                   FROM products p
                  WHERE p.seller_id = $1 AND p.deleted_at IS NULL AND p.stock = 0)
                    AS out_of_stock_count,
                (SELECT COUNT(*)
                   FROM reviews r
                   JOIN products p ON p.id = r.product_id
                  WHERE p.seller_id = $1
                    AND NOT EXISTS (SELECT 1 FROM review_replies rr WHERE rr.review_id = r.id))
                    AS unreplied_review_count
            "#,
        )
        .bind(seller_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load dashboard totals for seller {seller_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn seller_rating_counts(
        &self,
        seller_id: i64,
    ) -> Result<Vec<RatingCount>, RepositoryError> {
        sqlx::query_as::<_, RatingCount>(
            r#"
            SELECT r.rating, COUNT(*) AS count
            FROM reviews r
            JOIN products p ON p.id = r.product_id
            WHERE p.seller_id = $1
            GROUP BY r.rating
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load rating counts for seller {seller_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn seller_status_counts(
        &self,
        seller_id: i64,
    ) -> Result<Vec<StatusCount>, RepositoryError> {
        sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT o.status, COUNT(DISTINCT o.id) AS count
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            WHERE oi.seller_id = $1
            GROUP BY o.status
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load status counts for seller {seller_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn seller_daily_sales(
        &self,
        seller_id: i64,
        since: NaiveDate,
    ) -> Result<Vec<DailySales>, RepositoryError> {
        sqlx::query_as::<_, DailySales>(
            r#"
            SELECT o.created_at::DATE AS day, SUM(oi.subtotal) AS revenue
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE oi.seller_id = $1
              AND o.payment_status = 'paid'
              AND o.created_at::DATE >= $2
            GROUP BY o.created_at::DATE
            ORDER BY day
            "#,
        )
        .bind(seller_id)
        .bind(since)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load daily sales for seller {seller_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn seller_latest_lines(
        &self,
        seller_id: i64,
        limit: i64,
    ) -> Result<Vec<SellerOrderLine>, RepositoryError> {
        sqlx::query_as::<_, SellerOrderLine>(
            r#"
            SELECT oi.id AS item_id, o.id AS order_id, o.order_number, o.buyer_id, o.status,
                   oi.product_name, oi.quantity, oi.price, oi.subtotal, oi.created_at
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE oi.seller_id = $1
            ORDER BY oi.created_at DESC, oi.id DESC
            LIMIT $2
            "#,
        )
        .bind(seller_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load latest order lines for seller {seller_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn seller_upcoming_appointments(
        &self,
        seller_id: i64,
        from: NaiveDateTime,
        limit: i64,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            SELECT * FROM appointments
            WHERE seller_id = $1
              AND scheduled_at >= $2
              AND status IN ('waiting', 'confirmed')
            ORDER BY scheduled_at, id
            LIMIT $3
            "#,
        )
        .bind(seller_id)
        .bind(from)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to load upcoming appointments for seller {seller_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
