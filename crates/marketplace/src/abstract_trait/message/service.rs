use crate::domain::{
    actor::Actor,
    requests::{PageRequest, message::SendMessageRequest},
    response::{
        api::{ApiResponse, ApiResponsePagination},
        message::{ConversationResponse, MessageResponse, UnreadCountResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynMessageService = Arc<dyn MessageServiceTrait + Send + Sync>;

#[async_trait]
pub trait MessageServiceTrait {
    async fn send_message(
        &self,
        actor: &Actor,
        req: &SendMessageRequest,
    ) -> Result<ApiResponse<MessageResponse>, ServiceError>;
    async fn conversation(
        &self,
        actor: &Actor,
        partner_id: i64,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<MessageResponse>>, ServiceError>;
    async fn conversations(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<ConversationResponse>>, ServiceError>;
    async fn mark_message_read(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<MessageResponse>, ServiceError>;
    async fn unread_message_count(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError>;
}
