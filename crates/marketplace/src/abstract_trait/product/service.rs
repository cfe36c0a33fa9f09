use crate::domain::{
    actor::Actor,
    requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
    response::{
        api::{ApiResponse, ApiResponsePagination},
        product::{ProductDetailResponse, ProductResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductServiceTrait {
    async fn list_products(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn featured_products(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_product(
        &self,
        id_or_slug: &str,
    ) -> Result<ApiResponse<ProductDetailResponse>, ServiceError>;
    async fn seller_products(
        &self,
        actor: &Actor,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn create_product(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError>;
}
