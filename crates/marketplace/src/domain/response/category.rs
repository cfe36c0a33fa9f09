use crate::{domain::response::timestamp, model::category::Category};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            parent_id: value.parent_id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            created_at: timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub children: Vec<CategoryResponse>,
}
