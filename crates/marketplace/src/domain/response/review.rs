use crate::{
    domain::{rating::RatingStats, response::timestamp},
    model::review::{Review, ReviewReply},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewReplyResponse {
    pub id: i64,
    pub review_id: i64,
    pub seller_id: i64,
    pub comment: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<ReviewReply> for ReviewReplyResponse {
    fn from(value: ReviewReply) -> Self {
        Self {
            id: value.id,
            review_id: value.review_id,
            seller_id: value.seller_id,
            comment: value.comment,
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub order_item_id: i64,
    pub rating: i32,
    pub comment: String,
    pub images: Vec<String>,
    pub reply: Option<ReviewReplyResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ReviewResponse {
    pub fn new(review: Review, reply: Option<ReviewReply>) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            product_id: review.product_id,
            order_item_id: review.order_item_id,
            rating: review.rating,
            comment: review.comment,
            images: review.images.0,
            reply: reply.map(Into::into),
            created_at: timestamp(review.created_at),
            updated_at: timestamp(review.updated_at),
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        Self::new(value, None)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductReviewsResponse {
    pub stats: RatingStats,
    pub reviews: Vec<ReviewResponse>,
}
