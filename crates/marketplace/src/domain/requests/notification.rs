use crate::domain::{
    enums::NotificationKind,
    requests::{default_page, default_page_size},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindNotifications {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    pub kind: Option<NotificationKind>,

    /// `true` for unread only, `false` for read only.
    pub unread: Option<bool>,
}

impl Default for FindNotifications {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            kind: None,
            unread: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationListQuery {
    pub user_id: i64,
    pub kind: Option<NotificationKind>,
    pub unread: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationRecord {
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub data: Value,
    pub link: Option<String>,
    pub order_id: Option<i64>,
    pub appointment_id: Option<i64>,
}

impl CreateNotificationRecord {
    pub fn new(
        user_id: i64,
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            body: body.into(),
            kind,
            data: Value::Null,
            link: None,
            order_id: None,
            appointment_id: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn for_order(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn for_appointment(mut self, appointment_id: i64) -> Self {
        self.appointment_id = Some(appointment_id);
        self
    }
}
