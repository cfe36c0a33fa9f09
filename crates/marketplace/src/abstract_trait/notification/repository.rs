use crate::{
    domain::requests::notification::{CreateNotificationRecord, NotificationListQuery},
    model::notification::Notification,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynNotificationStore = Arc<dyn NotificationStoreTrait + Send + Sync>;

#[async_trait]
pub trait NotificationStoreTrait {
    async fn create_notification(
        &self,
        record: &CreateNotificationRecord,
    ) -> Result<Notification, RepositoryError>;
    async fn find_all(
        &self,
        query: &NotificationListQuery,
    ) -> Result<(Vec<Notification>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, RepositoryError>;
    async fn unread_count(&self, user_id: i64) -> Result<i64, RepositoryError>;
    async fn mark_read(&self, id: i64) -> Result<Notification, RepositoryError>;
    async fn mark_all_read(&self, user_id: i64) -> Result<u64, RepositoryError>;
}
