use crate::domain::{
    enums::{FishType, SortDirection},
    requests::{
        default_page, default_page_size, default_true, non_negative_amount, positive_amount, urls,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Name,
    Price,
    #[default]
    CreatedAt,
    RatingAvg,
}

impl ProductSort {
    pub const fn column(&self) -> &'static str {
        match self {
            ProductSort::Name => "p.name",
            ProductSort::Price => "p.price",
            ProductSort::CreatedAt => "p.created_at",
            ProductSort::RatingAvg => "p.rating_avg",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    pub category_id: Option<i64>,

    pub fish_type: Option<FishType>,

    #[validate(custom(function = "non_negative_amount"))]
    pub min_price: Option<Decimal>,

    #[validate(custom(function = "non_negative_amount"))]
    pub max_price: Option<Decimal>,

    #[serde(default)]
    pub sort_by: ProductSort,

    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
            category_id: None,
            fish_type: None,
            min_price: None,
            max_price: None,
            sort_by: ProductSort::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

/// Store-level product listing with the category tree already resolved.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category_ids: Vec<i64>,
    pub fish_type: Option<FishType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub seller_id: Option<i64>,
    /// Public listings hide inactive and sold-out products.
    pub public_only: bool,
    pub sort_by: ProductSort,
    pub sort_direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Fresh Yellowfin Tuna")]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(custom(function = "positive_amount"))]
    #[schema(value_type = String, example = "85000.00")]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 20)]
    pub stock: i32,

    pub category_id: i64,

    #[serde(default)]
    #[validate(length(max = 10), custom(function = "urls"))]
    pub images: Vec<String>,

    #[validate(range(min = 1, message = "Weight must be positive"))]
    pub weight_grams: Option<i32>,

    pub fish_type: FishType,

    #[validate(length(max = 255))]
    pub species: Option<String>,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(custom(function = "positive_amount"))]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    pub category_id: Option<i64>,

    #[validate(length(max = 10), custom(function = "urls"))]
    pub images: Option<Vec<String>>,

    #[validate(range(min = 1, message = "Weight must be positive"))]
    pub weight_grams: Option<i32>,

    pub fish_type: Option<FishType>,

    #[validate(length(max = 255))]
    pub species: Option<String>,

    pub active: Option<bool>,

    pub featured: Option<bool>,
}

/// Fully resolved product fields written by create and update.
///
/// `stock` is only written when set. Checkout decrements the column
/// concurrently, so an update that leaves it `None` must not touch it.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub seller_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: Option<i32>,
    pub images: Vec<String>,
    pub weight_grams: Option<i32>,
    pub fish_type: FishType,
    pub species: Option<String>,
    pub active: bool,
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid() -> CreateProductRequest {
        CreateProductRequest {
            name: "Tuna".into(),
            description: None,
            price: dec!(10.00),
            stock: 1,
            category_id: 1,
            images: vec!["https://cdn.example.com/tuna.jpg".into()],
            weight_grams: Some(500),
            fish_type: FishType::Fresh,
            species: None,
            active: true,
            featured: false,
        }
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut req = valid();
        assert!(req.validate().is_ok());

        req.price = Decimal::ZERO;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn image_must_be_url() {
        let mut req = valid();
        req.images = vec!["not a url".into()];
        assert!(req.validate().is_err());
    }
}
