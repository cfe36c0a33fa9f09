use crate::{
    abstract_trait::notification::{DynNotificationStore, NotificationSinkTrait},
    domain::requests::notification::CreateNotificationRecord,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use tracing::debug;

/// Delivers notifications as in-app records.
#[derive(Clone)]
pub struct InAppNotifier {
    store: DynNotificationStore,
}

impl InAppNotifier {
    pub fn new(store: DynNotificationStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationSinkTrait for InAppNotifier {
    async fn notify(&self, record: CreateNotificationRecord) -> Result<(), ServiceError> {
        let notification = self.store.create_notification(&record).await?;
        debug!(
            "🔔 Delivered {} notification {} to user {}",
            notification.kind, notification.id, notification.user_id
        );
        Ok(())
    }
}
