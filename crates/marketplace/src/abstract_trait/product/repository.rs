use crate::{
    domain::requests::product::{ProductListQuery, ProductRecord},
    model::product::Product,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductStore = Arc<dyn ProductStoreTrait + Send + Sync>;

#[async_trait]
pub trait ProductStoreTrait {
    async fn find_all(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<Product>, i64), RepositoryError>;
    async fn find_featured(&self, limit: i64) -> Result<Vec<Product>, RepositoryError>;
    async fn find_related(&self, product: &Product, limit: i64)
    -> Result<Vec<Product>, RepositoryError>;
    /// Soft-deleted rows are returned too; callers decide visibility.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError>;
    async fn create_product(&self, record: &ProductRecord) -> Result<Product, RepositoryError>;
    async fn update_product(
        &self,
        id: i64,
        record: &ProductRecord,
    ) -> Result<Product, RepositoryError>;
    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;
}
