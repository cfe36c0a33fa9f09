use crate::{
    abstract_trait::notification::DynNotificationService,
    domain::{
        actor::Actor,
        requests::notification::FindNotifications,
        response::{
            api::{ApiResponse, ApiResponsePagination, CountResponse},
            notification::{NotificationListResponse, NotificationResponse},
        },
    },
    middleware::jwt::auth_middleware,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(FindNotifications),
    responses(
        (status = 200, description = "The caller's notifications with unread count", body = ApiResponsePagination<NotificationListResponse>)
    )
)]
pub async fn get_notifications(
    Extension(service): Extension<DynNotificationService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindNotifications>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_notifications(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    )
)]
pub async fn mark_notification_read(
    Extension(service): Extension<DynNotificationService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.mark_notification_read(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every unread notification marked read", body = ApiResponse<CountResponse>)
    )
)]
pub async fn mark_all_notifications_read(
    Extension(service): Extension<DynNotificationService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.mark_all_read(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn notification_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/notifications", get(get_notifications))
        .route("/api/notifications/{id}/read", put(mark_notification_read))
        .route("/api/notifications/read-all", put(mark_all_notifications_read))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.notification_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
