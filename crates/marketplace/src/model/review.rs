use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub order_item_id: i64,
    pub rating: i32,
    pub comment: String,
    pub images: Json<Vec<String>>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewReply {
    pub id: i64,
    pub review_id: i64,
    pub seller_id: i64,
    pub comment: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct RatingCount {
    pub rating: i32,
    pub count: i64,
}
