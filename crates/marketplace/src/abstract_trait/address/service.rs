use crate::domain::{
    actor::Actor,
    requests::address::{CreateAddressRequest, UpdateAddressRequest},
    response::{address::AddressResponse, api::ApiResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynAddressService = Arc<dyn AddressServiceTrait + Send + Sync>;

#[async_trait]
pub trait AddressServiceTrait {
    async fn my_addresses(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<AddressResponse>>, ServiceError>;
    async fn find_address(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError>;
    async fn create_address(
        &self,
        actor: &Actor,
        req: &CreateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError>;
    async fn update_address(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError>;
    async fn set_main_address(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError>;
    async fn delete_address(&self, actor: &Actor, id: i64)
    -> Result<ApiResponse<()>, ServiceError>;
}
