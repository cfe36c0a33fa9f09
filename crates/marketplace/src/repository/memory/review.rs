use super::{MemoryStore, now, paginate};
use crate::{
    abstract_trait::review::ReviewStoreTrait,
    domain::{
        rating::average_rating,
        requests::review::{CreateReviewRecord, ReviewListQuery, UpdateReviewRecord},
    },
    model::review::{RatingCount, Review, ReviewReply},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use sqlx::types::Json;
use std::collections::BTreeMap;

#[async_trait]
impl ReviewStoreTrait for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.reviews.get(&id).cloned())
    }

    async fn find_all(
        &self,
        query: &ReviewListQuery,
    ) -> Result<(Vec<Review>, i64), RepositoryError> {
        let t = self.tables.lock().await;

        let has_reply = |review_id: i64| t.replies.values().any(|r| r.review_id == review_id);

        let reviews: Vec<Review> = t
            .reviews
            .values()
            .rev()
            .filter(|r| query.product_id.is_none_or(|id| r.product_id == id))
            .filter(|r| query.user_id.is_none_or(|id| r.user_id == id))
            .filter(|r| query.rating.is_none_or(|rating| r.rating == rating))
            .filter(|r| query.has_reply.is_none_or(|want| has_reply(r.id) == want))
            .cloned()
            .collect();

        Ok(paginate(reviews, query.limit, query.offset))
    }

    async fn exists_for(
        &self,
        user_id: i64,
        product_id: i64,
        order_item_id: i64,
    ) -> Result<bool, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.reviews.values().any(|r| {
            r.user_id == user_id && r.product_id == product_id && r.order_item_id == order_item_id
        }))
    }

    async fn create_review(&self, record: &CreateReviewRecord) -> Result<Review, RepositoryError> {
        let mut t = self.tables.lock().await;

        if t.reviews.values().any(|r| {
            r.user_id == record.user_id
                && r.product_id == record.product_id
                && r.order_item_id == record.order_item_id
        }) {
            return Err(RepositoryError::AlreadyExists("review".into()));
        }

        let id = t.next_id();
        let review = Review {
            id,
            user_id: record.user_id,
            product_id: record.product_id,
            order_item_id: record.order_item_id,
            rating: record.rating,
            comment: record.comment.clone(),
            images: Json(record.images.clone()),
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        t.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn update_review(&self, record: &UpdateReviewRecord) -> Result<Review, RepositoryError> {
        let mut t = self.tables.lock().await;
        let review = t
            .reviews
            .get_mut(&record.id)
            .ok_or(RepositoryError::NotFound)?;
        review.rating = record.rating;
        review.comment = record.comment.clone();
        review.images = Json(record.images.clone());
        review.updated_at = Some(now());
        Ok(review.clone())
    }

    async fn delete_review(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.tables.lock().await;
        t.reviews.remove(&id).ok_or(RepositoryError::NotFound)?;
        t.replies.retain(|_, r| r.review_id != id);
        Ok(())
    }

    async fn rating_counts(&self, product_id: i64) -> Result<Vec<RatingCount>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut counts: BTreeMap<i32, i64> = BTreeMap::new();
        for review in t.reviews.values().filter(|r| r.product_id == product_id) {
            *counts.entry(review.rating).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(rating, count)| RatingCount { rating, count })
            .collect())
    }

    async fn refresh_product_rating(
        &self,
        product_id: i64,
    ) -> Result<(Decimal, i32), RepositoryError> {
        let mut t = self.tables.lock().await;

        let ratings: Vec<i32> = t
            .reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.rating)
            .collect();
        let average = average_rating(&ratings);
        let count = ratings.len() as i32;

        let product = t
            .products
            .get_mut(&product_id)
            .ok_or(RepositoryError::NotFound)?;
        product.rating_avg = average;
        product.review_count = count;

        Ok((average, count))
    }

    async fn find_reply(&self, review_id: i64) -> Result<Option<ReviewReply>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.replies
            .values()
            .find(|r| r.review_id == review_id)
            .cloned())
    }

    async fn find_replies(&self, review_ids: &[i64]) -> Result<Vec<ReviewReply>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.replies
            .values()
            .filter(|r| review_ids.contains(&r.review_id))
            .cloned()
            .collect())
    }

    async fn upsert_reply(
        &self,
        review_id: i64,
        seller_id: i64,
        comment: &str,
    ) -> Result<(ReviewReply, bool), RepositoryError> {
        let mut t = self.tables.lock().await;

        if !t.reviews.contains_key(&review_id) {
            return Err(RepositoryError::NotFound);
        }

        if let Some(reply) = t.replies.values_mut().find(|r| r.review_id == review_id) {
            reply.seller_id = seller_id;
            reply.comment = comment.to_string();
            reply.updated_at = Some(now());
            return Ok((reply.clone(), false));
        }

        let id = t.next_id();
        let reply = ReviewReply {
            id,
            review_id,
            seller_id,
            comment: comment.to_string(),
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        t.replies.insert(id, reply.clone());
        Ok((reply, true))
    }
}
