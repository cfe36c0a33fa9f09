use crate::domain::{
    actor::Actor,
    requests::cart::{AddCartItemRequest, UpdateCartItemRequest},
    response::{
        api::{ApiResponse, CountResponse},
        cart::CartResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartServiceTrait {
    async fn list(&self, actor: &Actor) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add(
        &self,
        actor: &Actor,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn update(
        &self,
        actor: &Actor,
        item_id: i64,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove(
        &self,
        actor: &Actor,
        item_id: i64,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn clear(&self, actor: &Actor) -> Result<ApiResponse<CountResponse>, ServiceError>;
}
