use crate::domain::requests::notification::CreateNotificationRecord;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use tracing::warn;

pub type DynNotificationSink = Arc<dyn NotificationSinkTrait + Send + Sync>;

/// Outbound delivery of user notifications.
#[async_trait]
pub trait NotificationSinkTrait {
    async fn notify(&self, record: CreateNotificationRecord) -> Result<(), ServiceError>;
}

/// Delivers each notification independently. Failures never reach the
/// caller: the triggering operation has already committed.
pub async fn notify_all(sink: &DynNotificationSink, records: Vec<CreateNotificationRecord>) {
    for record in records {
        let user_id = record.user_id;
        if let Err(e) = sink.notify(record).await {
            warn!("⚠️ Failed to notify user {user_id}: {e}");
        }
    }
}
