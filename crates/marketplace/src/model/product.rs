use crate::domain::enums::FishType;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub seller_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub images: Json<Vec<String>>,
    pub weight_grams: Option<i32>,
    pub fish_type: FishType,
    pub species: Option<String>,
    pub rating_avg: Decimal,
    pub review_count: i32,
    pub active: bool,
    pub featured: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Product {
    /// Listed and purchasable: active, not deleted.
    pub fn is_listed(&self) -> bool {
        self.active && self.deleted_at.is_none()
    }

    pub fn is_purchasable(&self) -> bool {
        self.is_listed() && self.stock > 0
    }
}
