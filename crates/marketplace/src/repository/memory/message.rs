use super::{MemoryStore, now, paginate};
use crate::{
    abstract_trait::message::MessageStoreTrait,
    domain::requests::message::CreateMessageRecord,
    model::message::{ConversationSummary, Message},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use sqlx::types::Json;
use std::collections::HashMap;

fn between(message: &Message, a: i64, b: i64) -> bool {
    (message.sender_id == a && message.recipient_id == b)
        || (message.sender_id == b && message.recipient_id == a)
}

#[async_trait]
impl MessageStoreTrait for MemoryStore {
    async fn create_message(
        &self,
        record: &CreateMessageRecord,
    ) -> Result<Message, RepositoryError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();
        let message = Message {
            id,
            sender_id: record.sender_id,
            recipient_id: record.recipient_id,
            product_id: record.product_id,
            appointment_id: record.appointment_id,
            body: record.body.clone(),
            kind: record.kind,
            attachments: Json(record.attachments.clone()),
            read_at: None,
            created_at: Some(now()),
        };
        t.messages.insert(id, message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.messages.get(&id).cloned())
    }

    async fn find_conversation(
        &self,
        user_id: i64,
        partner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Message>, i64), RepositoryError> {
        let t = self.tables.lock().await;
        let messages: Vec<Message> = t
            .messages
            .values()
            .rev()
            .filter(|m| between(m, user_id, partner_id))
            .cloned()
            .collect();
        Ok(paginate(messages, limit, offset))
    }

    async fn mark_conversation_read(
        &self,
        user_id: i64,
        partner_id: i64,
    ) -> Result<u64, RepositoryError> {
        let mut t = self.tables.lock().await;
        let at = now();
        let mut affected = 0;
        for message in t.messages.values_mut().filter(|m| {
            m.sender_id == partner_id && m.recipient_id == user_id && m.read_at.is_none()
        }) {
            message.read_at = Some(at);
            affected += 1;
        }
        Ok(affected)
    }

    async fn find_conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationSummary>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut summaries: HashMap<i64, ConversationSummary> = HashMap::new();
        for message in t.messages.values() {
            let partner_id = if message.sender_id == user_id {
                message.recipient_id
            } else if message.recipient_id == user_id {
                message.sender_id
            } else {
                continue;
            };

            let unread =
                i64::from(message.recipient_id == user_id && message.read_at.is_none());

            let summary = summaries
                .entry(partner_id)
                .or_insert_with(|| ConversationSummary {
                    partner_id,
                    last_message_id: 0,
                    last_body: String::new(),
                    last_sender_id: 0,
                    last_at: None,
                    unread_count: 0,
                });

            // ids grow monotonically, so the last one seen is the latest
            summary.last_message_id = message.id;
            summary.last_body = message.body.clone();
            summary.last_sender_id = message.sender_id;
            summary.last_at = message.created_at;
            summary.unread_count += unread;
        }

        let mut summaries: Vec<ConversationSummary> = summaries.into_values().collect();
        summaries.sort_by(|a, b| b.last_message_id.cmp(&a.last_message_id));
        Ok(summaries)
    }

    async fn mark_read(&self, id: i64) -> Result<Message, RepositoryError> {
        let mut t = self.tables.lock().await;
        let message = t.messages.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if message.read_at.is_none() {
            message.read_at = Some(now());
        }
        Ok(message.clone())
    }

    async fn unread_count(&self, user_id: i64) -> Result<i64, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.messages
            .values()
            .filter(|m| m.recipient_id == user_id && m.read_at.is_none())
            .count() as i64)
    }
}
