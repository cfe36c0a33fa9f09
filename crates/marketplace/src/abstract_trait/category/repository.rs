use crate::{domain::requests::category::CategoryRecord, model::category::Category};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCategoryStore = Arc<dyn CategoryStoreTrait + Send + Sync>;

#[async_trait]
pub trait CategoryStoreTrait {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError>;
    async fn find_children(&self, parent_id: i64) -> Result<Vec<Category>, RepositoryError>;
    async fn create_category(&self, record: &CategoryRecord) -> Result<Category, RepositoryError>;
}
