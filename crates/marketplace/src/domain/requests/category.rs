use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    #[schema(example = "Saltwater Fish")]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
