use super::{Counted, split_counted};
use crate::{
    abstract_trait::review::ReviewStoreTrait,
    domain::requests::review::{CreateReviewRecord, ReviewListQuery, UpdateReviewRecord},
    model::review::{RatingCount, Review, ReviewReply},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{FromRow, Row, types::Json};
use tracing::{error, info};

#[derive(Clone)]
pub struct ReviewRepository {
    db: ConnectionPool,
}

impl ReviewRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewStoreTrait for ReviewRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, RepositoryError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch review {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_all(
        &self,
        query: &ReviewListQuery,
    ) -> Result<(Vec<Review>, i64), RepositoryError> {
        let rows = sqlx::query_as::<_, Counted<Review>>(
            r#"
            SELECT r.*, COUNT(*) OVER() AS total_count
            FROM reviews r
            WHERE ($1::BIGINT IS NULL OR r.product_id = $1)
              AND ($2::BIGINT IS NULL OR r.user_id = $2)
              AND ($3::INTEGER IS NULL OR r.rating = $3)
              AND ($4::BOOLEAN IS NULL
                   OR EXISTS (SELECT 1 FROM review_replies rr WHERE rr.review_id = r.id) = $4)
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(query.product_id)
        .bind(query.user_id)
        .bind(query.rating)
        .bind(query.has_reply)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch reviews: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(split_counted(rows))
    }

    async fn exists_for(
        &self,
        user_id: i64,
        product_id: i64,
        order_item_id: i64,
    ) -> Result<bool, RepositoryError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reviews
                WHERE user_id = $1 AND product_id = $2 AND order_item_id = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(order_item_id)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create_review(&self, record: &CreateReviewRecord) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (
                user_id, product_id, order_item_id, rating, comment, images,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.user_id)
        .bind(record.product_id)
        .bind(record.order_item_id)
        .bind(record.rating)
        .bind(&record.comment)
        .bind(Json(&record.images))
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create review for item {}: {e:?}", record.order_item_id);
            RepositoryError::from(e)
        })?;

        info!("⭐ Created review ID {} on product {}", review.id, review.product_id);
        Ok(review)
    }

    async fn update_review(&self, record: &UpdateReviewRecord) -> Result<Review, RepositoryError> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = $2, comment = $3, images = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.rating)
        .bind(&record.comment)
        .bind(Json(&record.images))
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update review {}: {e:?}", record.id);
            RepositoryError::from(e)
        })
    }

    async fn delete_review(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete review {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn rating_counts(&self, product_id: i64) -> Result<Vec<RatingCount>, RepositoryError> {
        sqlx::query_as::<_, RatingCount>(
            r#"
            SELECT rating, COUNT(*) AS count
            FROM reviews
            WHERE product_id = $1
            GROUP BY rating
            ORDER BY rating DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count ratings of product {product_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn refresh_product_rating(
        &self,
        product_id: i64,
    ) -> Result<(Decimal, i32), RepositoryError> {
        let refreshed = sqlx::query_as::<_, (Decimal, i32)>(
            r#"
            UPDATE products p
            SET rating_avg = COALESCE(s.average, 0),
                review_count = s.total,
                updated_at = CURRENT_TIMESTAMP
            FROM (
                SELECT ROUND(AVG(rating)::NUMERIC, 1) AS average, COUNT(*)::INTEGER AS total
                FROM reviews
                WHERE product_id = $1
            ) s
            WHERE p.id = $1
            RETURNING p.rating_avg, p.review_count
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to refresh rating of product {product_id}: {e:?}");
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!(
            "📊 Product {product_id} rating is now {} over {} reviews",
            refreshed.0, refreshed.1
        );
        Ok(refreshed)
    }

    async fn find_reply(&self, review_id: i64) -> Result<Option<ReviewReply>, RepositoryError> {
        sqlx::query_as::<_, ReviewReply>("SELECT * FROM review_replies WHERE review_id = $1")
            .bind(review_id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_replies(&self, review_ids: &[i64]) -> Result<Vec<ReviewReply>, RepositoryError> {
        sqlx::query_as::<_, ReviewReply>("SELECT * FROM review_replies WHERE review_id = ANY($1)")
            .bind(review_ids)
            .fetch_all(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn upsert_reply(
        &self,
        review_id: i64,
        seller_id: i64,
        comment: &str,
    ) -> Result<(ReviewReply, bool), RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO review_replies (review_id, seller_id, comment, created_at, updated_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            ON CONFLICT (review_id) DO UPDATE
            SET seller_id = EXCLUDED.seller_id,
                comment = EXCLUDED.comment,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *, (xmax = 0) AS inserted
            "#,
        )
        .bind(review_id)
        .bind(seller_id)
        .bind(comment)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to save reply on review {review_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        let reply = ReviewReply::from_row(&row)?;
        let inserted: bool = row.try_get("inserted")?;
        Ok((reply, inserted))
    }
}
