use crate::domain::{
    enums::SellerType,
    requests::{default_page, default_page_size, default_true, urls},
    schedule::OperatingHours,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSellerLocationRequest {
    #[validate(length(min = 1, max = 255, message = "Business name is required"))]
    #[schema(example = "Paotere Fresh Catch")]
    pub business_name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, max = 100, message = "Province is required"))]
    pub province: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(max = 100))]
    pub district: Option<String>,

    #[validate(length(max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10), custom(function = "urls"))]
    pub photos: Vec<String>,

    pub seller_type: SellerType,

    #[serde(default)]
    pub operating_hours: Vec<OperatingHours>,

    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSellerLocationRequest {
    #[validate(length(min = 1, max = 255, message = "Business name cannot be empty"))]
    pub business_name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Address cannot be empty"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub province: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    #[validate(length(max = 100))]
    pub district: Option<String>,

    #[validate(length(max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 10), custom(function = "urls"))]
    pub photos: Option<Vec<String>>,

    pub seller_type: Option<SellerType>,

    pub operating_hours: Option<Vec<OperatingHours>>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindSellerLocations {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    pub city: Option<String>,

    pub seller_type: Option<SellerType>,
}

impl Default for FindSellerLocations {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
            city: None,
            seller_type: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SellerLocationListQuery {
    pub seller_id: Option<i64>,
    pub active_only: bool,
    pub search: Option<String>,
    pub city: Option<String>,
    pub seller_type: Option<SellerType>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct SellerLocationRecord {
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
}
