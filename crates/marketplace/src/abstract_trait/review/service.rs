use crate::domain::{
    actor::Actor,
    requests::{
        PageRequest,
        review::{
            CreateReviewRequest, FindProductReviews, ReplyReviewRequest, UpdateReviewRequest,
        },
    },
    response::{
        api::{ApiResponse, ApiResponsePagination},
        review::{ProductReviewsResponse, ReviewReplyResponse, ReviewResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynReviewService = Arc<dyn ReviewServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReviewServiceTrait {
    async fn create_review(
        &self,
        actor: &Actor,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn update_review(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn delete_review(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError>;
    async fn find_review(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn my_reviews(
        &self,
        actor: &Actor,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError>;
    async fn product_reviews(
        &self,
        product_id: i64,
        req: &FindProductReviews,
    ) -> Result<ApiResponsePagination<ProductReviewsResponse>, ServiceError>;
    async fn reply_review(
        &self,
        actor: &Actor,
        review_id: i64,
        req: &ReplyReviewRequest,
    ) -> Result<ApiResponse<ReviewReplyResponse>, ServiceError>;
}
