use crate::{
    domain::{enums::SellerType, response::timestamp, schedule::OperatingHours},
    model::seller_location::SellerLocation,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerLocationResponse {
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
    pub photos: Vec<String>,
    pub seller_type: SellerType,
    pub operating_hours: Vec<OperatingHours>,
    pub active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<SellerLocation> for SellerLocationResponse {
    fn from(value: SellerLocation) -> Self {
        Self {
            id: value.id,
            seller_id: value.seller_id,
            business_name: value.business_name,
            description: value.description,
            address: value.address,
            province: value.province,
            city: value.city,
            district: value.district,
            postal_code: value.postal_code,
            phone: value.phone,
            photos: value.photos.0,
            seller_type: value.seller_type,
            operating_hours: value.operating_hours.0,
            active: value.active,
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}
