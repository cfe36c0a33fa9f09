use crate::domain::enums::MessageKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub product_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub body: String,
    pub kind: MessageKind,
    pub attachments: Json<Vec<String>>,
    pub read_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

/// Latest message exchanged with one partner plus what is still unread.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationSummary {
    pub partner_id: i64,
    pub last_message_id: i64,
    pub last_body: String,
    pub last_sender_id: i64,
    pub last_at: Option<NaiveDateTime>,
    pub unread_count: i64,
}
