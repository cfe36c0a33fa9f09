use crate::domain::{
    actor::Actor,
    requests::{
        PageRequest,
        seller_location::{
            CreateSellerLocationRequest, FindSellerLocations, UpdateSellerLocationRequest,
        },
    },
    response::{
        api::{ApiResponse, ApiResponsePagination},
        seller_location::SellerLocationResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynSellerLocationService = Arc<dyn SellerLocationServiceTrait + Send + Sync>;

#[async_trait]
pub trait SellerLocationServiceTrait {
    async fn create_location(
        &self,
        actor: &Actor,
        req: &CreateSellerLocationRequest,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError>;
    async fn update_location(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateSellerLocationRequest,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError>;
    async fn delete_location(&self, actor: &Actor, id: i64)
    -> Result<ApiResponse<()>, ServiceError>;
    async fn my_locations(
        &self,
        actor: &Actor,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<SellerLocationResponse>>, ServiceError>;
    async fn list_locations(
        &self,
        req: &FindSellerLocations,
    ) -> Result<ApiResponsePagination<Vec<SellerLocationResponse>>, ServiceError>;
    async fn find_location(
        &self,
        id: i64,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError>;
}
