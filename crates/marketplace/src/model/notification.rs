use crate::domain::enums::NotificationKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub data: Json<serde_json::Value>,
    pub link: Option<String>,
    pub order_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub read_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}
