use crate::domain::{enums::SellerType, schedule::OperatingHours};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SellerLocation {
    pub id: i64,
    pub seller_id: i64,
    pub business_name: String,
    pub description: Option<String>,
    pub address: String,
    pub province: String,
    pub city: String,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub photos: Json<Vec<String>>,
    pub seller_type: SellerType,
    pub operating_hours: Json<Vec<OperatingHours>>,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
