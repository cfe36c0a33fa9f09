use crate::{
    domain::{enums::FishType, response::timestamp},
    model::product::Product,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub seller_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "85000.00")]
    pub price: Decimal,
    pub stock: i32,
    pub images: Vec<String>,
    pub weight_grams: Option<i32>,
    pub fish_type: FishType,
    pub species: Option<String>,
    #[schema(value_type = String, example = "4.5")]
    pub rating_avg: Decimal,
    pub review_count: i32,
    pub active: bool,
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            seller_id: value.seller_id,
            category_id: value.category_id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            price: value.price,
            stock: value.stock,
            images: value.images.0,
            weight_grams: value.weight_grams,
            fish_type: value.fish_type,
            species: value.species,
            rating_avg: value.rating_avg,
            review_count: value.review_count,
            active: value.active,
            featured: value.featured,
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub related: Vec<ProductResponse>,
}
