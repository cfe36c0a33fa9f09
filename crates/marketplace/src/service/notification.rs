use crate::{
    abstract_trait::notification::{DynNotificationStore, NotificationServiceTrait},
    domain::{
        actor::Actor,
        requests::{
            notification::{FindNotifications, NotificationListQuery},
            page_window,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination, CountResponse},
            notification::{NotificationListResponse, NotificationResponse},
            pagination::Pagination,
        },
    },
    service::{found, validate_request},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct NotificationService {
    store: DynNotificationStore,
    tracer: ServiceTracer,
}

impl NotificationService {
    pub fn new(store: DynNotificationStore, registry: &mut Registry) -> Self {
        Self {
            store,
            tracer: ServiceTracer::new("notification_service", "NotificationService", registry),
        }
    }

    async fn list(
        &self,
        actor: &Actor,
        req: &FindNotifications,
    ) -> Result<ApiResponsePagination<NotificationListResponse>, ServiceError> {
        validate_request(req)?;

        let (limit, offset) = page_window(req.page, req.page_size);
        let query = NotificationListQuery {
            user_id: actor.user_id,
            kind: req.kind,
            unread: req.unread,
            limit,
            offset,
        };

        let (notifications, total) = self.store.find_all(&query).await?;
        let unread_count = self.store.unread_count(actor.user_id).await?;

        Ok(ApiResponsePagination::ok(
            "Notifications retrieved successfully",
            NotificationListResponse {
                notifications: notifications.into_iter().map(Into::into).collect(),
                unread_count,
            },
            Pagination::new(req.page, limit as i32, total),
        ))
    }

    async fn read_one(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        let notification = found(self.store.find_by_id(id).await?, "Notification")?;

        if notification.user_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "you can only read your own notifications".into(),
            ));
        }

        let notification = self.store.mark_read(id).await?;
        Ok(ApiResponse::ok(
            "Notification marked as read",
            notification.into(),
        ))
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn list_notifications(
        &self,
        actor: &Actor,
        req: &FindNotifications,
    ) -> Result<ApiResponsePagination<NotificationListResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_notifications",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("user_id", actor.user_id),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let result = self.list(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Notifications retrieved")
    }

    async fn mark_notification_read(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "mark_notification_read",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("notification_id", id),
            ],
        );

        let result = self.read_one(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Notification marked as read")
    }

    async fn mark_all_read(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<CountResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "mark_all_notifications_read",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self
            .store
            .mark_all_read(actor.user_id)
            .await
            .map_err(ServiceError::from)
            .map(|affected_count| {
                info!("📭 Marked {affected_count} notifications read for user {}", actor.user_id);
                ApiResponse::ok(
                    "All notifications marked as read",
                    CountResponse { affected_count },
                )
            });

        self.tracer
            .finish(&tracing_ctx, method, result, "All notifications marked as read")
    }
}
