use crate::{
    domain::requests::message::CreateMessageRecord,
    model::message::{ConversationSummary, Message},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynMessageStore = Arc<dyn MessageStoreTrait + Send + Sync>;

#[async_trait]
pub trait MessageStoreTrait {
    async fn create_message(&self, record: &CreateMessageRecord)
    -> Result<Message, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, RepositoryError>;
    /// Messages exchanged between two users, newest first.
    async fn find_conversation(
        &self,
        user_id: i64,
        partner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Message>, i64), RepositoryError>;
    /// Marks what `partner_id` sent to `user_id` as read.
    async fn mark_conversation_read(
        &self,
        user_id: i64,
        partner_id: i64,
    ) -> Result<u64, RepositoryError>;
    async fn find_conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationSummary>, RepositoryError>;
    async fn mark_read(&self, id: i64) -> Result<Message, RepositoryError>;
    async fn unread_count(&self, user_id: i64) -> Result<i64, RepositoryError>;
}
