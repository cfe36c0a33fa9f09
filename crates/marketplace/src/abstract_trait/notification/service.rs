use crate::domain::{
    actor::Actor,
    requests::notification::FindNotifications,
    response::{
        api::{ApiResponse, ApiResponsePagination, CountResponse},
        notification::{NotificationListResponse, NotificationResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynNotificationService = Arc<dyn NotificationServiceTrait + Send + Sync>;

#[async_trait]
pub trait NotificationServiceTrait {
    async fn list_notifications(
        &self,
        actor: &Actor,
        req: &FindNotifications,
    ) -> Result<ApiResponsePagination<NotificationListResponse>, ServiceError>;
    async fn mark_notification_read(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError>;
    async fn mark_all_read(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<CountResponse>, ServiceError>;
}
