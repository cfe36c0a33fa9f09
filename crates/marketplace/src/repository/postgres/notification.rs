use super::{Counted, split_counted};
use crate::{
    abstract_trait::notification::NotificationStoreTrait,
    domain::requests::notification::{CreateNotificationRecord, NotificationListQuery},
    model::notification::Notification,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct NotificationRepository {
    db: ConnectionPool,
}

impl NotificationRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationStoreTrait for NotificationRepository {
    async fn create_notification(
        &self,
        record: &CreateNotificationRecord,
    ) -> Result<Notification, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                user_id, title, body, kind, data, link, order_id, appointment_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.user_id)
        .bind(&record.title)
        .bind(&record.body)
        .bind(record.kind)
        .bind(Json(&record.data))
        .bind(&record.link)
        .bind(record.order_id)
        .bind(record.appointment_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to notify user {}: {e:?}", record.user_id);
            RepositoryError::from(e)
        })?;

        info!(
            "🔔 Notification {} ({}) stored for user {}",
            notification.id, notification.kind, notification.user_id
        );
        Ok(notification)
    }

    async fn find_all(
        &self,
        query: &NotificationListQuery,
    ) -> Result<(Vec<Notification>, i64), RepositoryError> {
        let rows = sqlx::query_as::<_, Counted<Notification>>(
            r#"
            SELECT n.*, COUNT(*) OVER() AS total_count
            FROM notifications n
            WHERE n.user_id = $1
              AND ($2::TEXT IS NULL OR n.kind = $2)
              AND ($3::BOOLEAN IS NULL OR (n.read_at IS NULL) = $3)
            ORDER BY n.created_at DESC, n.id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.user_id)
        .bind(query.kind)
        .bind(query.unread)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch notifications of user {}: {e:?}", query.user_id);
            RepositoryError::from(e)
        })?;

        Ok(split_counted(rows))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, RepositoryError> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn unread_count(&self, user_id: i64) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn mark_read(&self, id: i64) -> Result<Notification, RepositoryError> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, CURRENT_TIMESTAMP)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn mark_all_read(&self, user_id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET read_at = CURRENT_TIMESTAMP WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark notifications of user {user_id} read: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected())
    }
}
