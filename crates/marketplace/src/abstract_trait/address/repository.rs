use crate::{domain::requests::address::AddressRecord, model::address::Address};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynAddressStore = Arc<dyn AddressStoreTrait + Send + Sync>;

#[async_trait]
pub trait AddressStoreTrait {
    /// Main address first, then newest first.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Address>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, RepositoryError>;
    /// A user's first address becomes main regardless of `record.is_main`.
    async fn create_address(&self, record: &AddressRecord) -> Result<Address, RepositoryError>;
    async fn update_address(
        &self,
        id: i64,
        record: &AddressRecord,
    ) -> Result<Address, RepositoryError>;
    async fn set_main(&self, id: i64) -> Result<Address, RepositoryError>;
    /// Fails with `Conflict` while an order that is neither completed nor
    /// canceled ships to it. Removing the main address promotes the owner's
    /// oldest remaining one.
    async fn delete_address(&self, id: i64) -> Result<(), RepositoryError>;
}
