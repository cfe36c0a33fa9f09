use super::{Counted, split_counted};
use crate::{
    abstract_trait::message::MessageStoreTrait,
    domain::requests::message::CreateMessageRecord,
    model::message::{ConversationSummary, Message},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct MessageRepository {
    db: ConnectionPool,
}

impl MessageRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageStoreTrait for MessageRepository {
    async fn create_message(
        &self,
        record: &CreateMessageRecord,
    ) -> Result<Message, RepositoryError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                sender_id, recipient_id, product_id, appointment_id, body, kind, attachments,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.sender_id)
        .bind(record.recipient_id)
        .bind(record.product_id)
        .bind(record.appointment_id)
        .bind(&record.body)
        .bind(record.kind)
        .bind(Json(&record.attachments))
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to send message {} -> {}: {e:?}",
                record.sender_id, record.recipient_id
            );
            RepositoryError::from(e)
        })?;

        info!("💬 Message {} sent to user {}", message.id, message.recipient_id);
        Ok(message)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, RepositoryError> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_conversation(
        &self,
        user_id: i64,
        partner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Message>, i64), RepositoryError> {
        let rows = sqlx::query_as::<_, Counted<Message>>(
            r#"
            SELECT m.*, COUNT(*) OVER() AS total_count
            FROM messages m
            WHERE (m.sender_id = $1 AND m.recipient_id = $2)
               OR (m.sender_id = $2 AND m.recipient_id = $1)
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(partner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch conversation {user_id} <-> {partner_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(split_counted(rows))
    }

    async fn mark_conversation_read(
        &self,
        user_id: i64,
        partner_id: i64,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = CURRENT_TIMESTAMP
            WHERE sender_id = $2 AND recipient_id = $1 AND read_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(partner_id)
        .execute(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result.rows_affected())
    }

    async fn find_conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationSummary>, RepositoryError> {
        sqlx::query_as::<_, ConversationSummary>(
            r#"
            WITH convo AS (
                SELECT m.*,
                       CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END
                           AS partner_id
                FROM messages m
                WHERE m.sender_id = $1 OR m.recipient_id = $1
            ),
            latest AS (
                SELECT DISTINCT ON (partner_id)
                       partner_id,
                       id AS last_message_id,
                       body AS last_body,
                       sender_id AS last_sender_id,
                       created_at AS last_at
                FROM convo
                ORDER BY partner_id, id DESC
            )
            SELECT l.*,
                   (SELECT COUNT(*) FROM convo c
                    WHERE c.partner_id = l.partner_id
                      AND c.recipient_id = $1
                      AND c.read_at IS NULL) AS unread_count
            FROM latest l
            ORDER BY l.last_message_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch conversations of user {user_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn mark_read(&self, id: i64) -> Result<Message, RepositoryError> {
        sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages
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

    async fn unread_count(&self, user_id: i64) -> Result<i64, RepositoryError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE recipient_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }
}
