use crate::domain::{
    actor::Actor,
    requests::category::CreateCategoryRequest,
    response::{
        api::ApiResponse,
        category::{CategoryDetailResponse, CategoryResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCategoryService = Arc<dyn CategoryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryServiceTrait {
    async fn list_categories(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn find_category(
        &self,
        id: i64,
    ) -> Result<ApiResponse<CategoryDetailResponse>, ServiceError>;
    async fn create_category(
        &self,
        actor: &Actor,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
}
