use crate::{
    domain::{enums::MessageKind, response::timestamp},
    model::message::{ConversationSummary, Message},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub product_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub body: String,
    pub kind: MessageKind,
    pub attachments: Vec<String>,
    pub read_at: Option<String>,
    pub created_at: Option<String>,
}

impl From<Message> for MessageResponse {
    fn from(value: Message) -> Self {
        Self {
            id: value.id,
            sender_id: value.sender_id,
            recipient_id: value.recipient_id,
            product_id: value.product_id,
            appointment_id: value.appointment_id,
            body: value.body,
            kind: value.kind,
            attachments: value.attachments.0,
            read_at: timestamp(value.read_at),
            created_at: timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    pub partner_id: i64,
    pub last_message_id: i64,
    pub last_body: String,
    pub last_sender_id: i64,
    pub last_at: Option<String>,
    pub unread_count: i64,
}

impl From<ConversationSummary> for ConversationResponse {
    fn from(value: ConversationSummary) -> Self {
        Self {
            partner_id: value.partner_id,
            last_message_id: value.last_message_id,
            last_body: value.last_body,
            last_sender_id: value.last_sender_id,
            last_at: timestamp(value.last_at),
            unread_count: value.unread_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}
