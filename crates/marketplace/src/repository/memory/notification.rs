use super::{MemoryStore, now, paginate};
use crate::{
    abstract_trait::notification::NotificationStoreTrait,
    domain::requests::notification::{CreateNotificationRecord, NotificationListQuery},
    model::notification::Notification,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use sqlx::types::Json;

#[async_trait]
impl NotificationStoreTrait for MemoryStore {
    async fn create_notification(
        &self,
        record: &CreateNotificationRecord,
    ) -> Result<Notification, RepositoryError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();
        let notification = Notification {
            id,
            user_id: record.user_id,
            title: record.title.clone(),
            body: record.body.clone(),
            kind: record.kind,
            data: Json(record.data.clone()),
            link: record.link.clone(),
            order_id: record.order_id,
            appointment_id: record.appointment_id,
            read_at: None,
            created_at: Some(now()),
        };
        t.notifications.insert(id, notification.clone());
        Ok(notification)
    }

    async fn find_all(
        &self,
        query: &NotificationListQuery,
    ) -> Result<(Vec<Notification>, i64), RepositoryError> {
        let t = self.tables.lock().await;
        let notifications: Vec<Notification> = t
            .notifications
            .values()
            .rev()
            .filter(|n| n.user_id == query.user_id)
            .filter(|n| query.kind.is_none_or(|k| n.kind == k))
            .filter(|n| query.unread.is_none_or(|unread| n.read_at.is_none() == unread))
            .cloned()
            .collect();
        Ok(paginate(notifications, query.limit, query.offset))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.notifications.get(&id).cloned())
    }

    async fn unread_count(&self, user_id: i64) -> Result<i64, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.notifications
            .values()
            .filter(|n| n.user_id == user_id && n.read_at.is_none())
            .count() as i64)
    }

    async fn mark_read(&self, id: i64) -> Result<Notification, RepositoryError> {
        let mut t = self.tables.lock().await;
        let notification = t
            .notifications
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        if notification.read_at.is_none() {
            notification.read_at = Some(now());
        }
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, user_id: i64) -> Result<u64, RepositoryError> {
        let mut t = self.tables.lock().await;
        let at = now();
        let mut affected = 0;
        for notification in t
            .notifications
            .values_mut()
            .filter(|n| n.user_id == user_id && n.read_at.is_none())
        {
            notification.read_at = Some(at);
            affected += 1;
        }
        Ok(affected)
    }
}
