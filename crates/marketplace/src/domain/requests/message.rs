use crate::domain::{enums::MessageKind, requests::urls};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_kind() -> MessageKind {
    MessageKind::Text
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    pub recipient_id: i64,

    #[validate(length(min = 1, max = 2000, message = "Message body is required"))]
    #[schema(example = "Is the snapper still available tomorrow morning?")]
    pub body: String,

    #[serde(default = "default_kind")]
    pub kind: MessageKind,

    #[serde(default)]
    #[validate(length(max = 5), custom(function = "urls"))]
    pub attachments: Vec<String>,

    pub product_id: Option<i64>,

    pub appointment_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CreateMessageRecord {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub product_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub body: String,
    pub kind: MessageKind,
    pub attachments: Vec<String>,
}
