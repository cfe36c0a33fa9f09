use crate::{
    domain::requests::review::{CreateReviewRecord, ReviewListQuery, UpdateReviewRecord},
    model::review::{RatingCount, Review, ReviewReply},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynReviewStore = Arc<dyn ReviewStoreTrait + Send + Sync>;

#[async_trait]
pub trait ReviewStoreTrait {
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, RepositoryError>;
    async fn find_all(
        &self,
        query: &ReviewListQuery,
    ) -> Result<(Vec<Review>, i64), RepositoryError>;
    async fn exists_for(
        &self,
        user_id: i64,
        product_id: i64,
        order_item_id: i64,
    ) -> Result<bool, RepositoryError>;
    async fn create_review(&self, record: &CreateReviewRecord) -> Result<Review, RepositoryError>;
    async fn update_review(&self, record: &UpdateReviewRecord) -> Result<Review, RepositoryError>;
    /// Removes the review together with its reply.
    async fn delete_review(&self, id: i64) -> Result<(), RepositoryError>;
    async fn rating_counts(&self, product_id: i64) -> Result<Vec<RatingCount>, RepositoryError>;
    /// Recomputes and stores the product's average rating and review count.
    async fn refresh_product_rating(
        &self,
        product_id: i64,
    ) -> Result<(Decimal, i32), RepositoryError>;
    async fn find_reply(&self, review_id: i64) -> Result<Option<ReviewReply>, RepositoryError>;
    async fn find_replies(&self, review_ids: &[i64]) -> Result<Vec<ReviewReply>, RepositoryError>;
    /// Returns the reply and whether it was newly created.
    async fn upsert_reply(
        &self,
        review_id: i64,
        seller_id: i64,
        comment: &str,
    ) -> Result<(ReviewReply, bool), RepositoryError>;
}
