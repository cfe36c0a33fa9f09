use crate::{
    domain::requests::seller_location::{SellerLocationListQuery, SellerLocationRecord},
    model::seller_location::SellerLocation,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynSellerLocationStore = Arc<dyn SellerLocationStoreTrait + Send + Sync>;

#[async_trait]
pub trait SellerLocationStoreTrait {
    async fn find_all(
        &self,
        query: &SellerLocationListQuery,
    ) -> Result<(Vec<SellerLocation>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<SellerLocation>, RepositoryError>;
    async fn create_location(
        &self,
        record: &SellerLocationRecord,
    ) -> Result<SellerLocation, RepositoryError>;
    async fn update_location(
        &self,
        id: i64,
        record: &SellerLocationRecord,
    ) -> Result<SellerLocation, RepositoryError>;
    async fn delete_location(&self, id: i64) -> Result<(), RepositoryError>;
}
