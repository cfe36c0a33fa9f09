use crate::{
    domain::{enums::NotificationKind, response::timestamp},
    model::notification::Notification,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    #[schema(value_type = Object)]
    pub data: Value,
    pub link: Option<String>,
    pub order_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub read_at: Option<String>,
    pub created_at: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            body: value.body,
            kind: value.kind,
            data: value.data.0,
            link: value.link,
            order_id: value.order_id,
            appointment_id: value.appointment_id,
            read_at: timestamp(value.read_at),
            created_at: timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: i64,
}
