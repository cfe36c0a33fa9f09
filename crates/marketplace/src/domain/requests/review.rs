use crate::domain::requests::{default_page, default_page_size, urls};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: i64,

    pub order_item_id: i64,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5)]
    pub rating: i32,

    #[validate(length(min = 1, max = 1000, message = "Comment is required"))]
    #[schema(example = "Very fresh, delivered on ice.")]
    pub comment: String,

    #[serde(default)]
    #[validate(length(max = 5), custom(function = "urls"))]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    #[validate(length(min = 1, max = 1000, message = "Comment cannot be empty"))]
    pub comment: Option<String>,

    #[validate(length(max = 5), custom(function = "urls"))]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplyReviewRequest {
    #[validate(length(min = 1, max = 1000, message = "Reply is required"))]
    #[schema(example = "Thank you for buying from us!")]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindProductReviews {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    pub has_reply: Option<bool>,
}

impl Default for FindProductReviews {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            rating: None,
            has_reply: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewListQuery {
    pub product_id: Option<i64>,
    pub user_id: Option<i64>,
    pub rating: Option<i32>,
    pub has_reply: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct CreateReviewRecord {
    pub user_id: i64,
    pub product_id: i64,
    pub order_item_id: i64,
    pub rating: i32,
    pub comment: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateReviewRecord {
    pub id: i64,
    pub rating: i32,
    pub comment: String,
    pub images: Vec<String>,
}
