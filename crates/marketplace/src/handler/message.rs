use crate::{
    abstract_trait::message::DynMessageService,
    domain::{
        actor::Actor,
        requests::{PageRequest, message::SendMessageRequest},
        response::{
            api::{ApiResponse, ApiResponsePagination},
            message::{ConversationResponse, MessageResponse, UnreadCountResponse},
        },
    },
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Message",
    security(("bearer_auth" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = ApiResponse<MessageResponse>),
        (status = 404, description = "Referenced product not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn send_message(
    Extension(service): Extension<DynMessageService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<SendMessageRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.send_message(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    tag = "Message",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "One entry per chat partner", body = ApiResponse<Vec<ConversationResponse>>)
    )
)]
pub async fn get_conversations(
    Extension(service): Extension<DynMessageService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.conversations(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/messages/unread-count",
    tag = "Message",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread messages addressed to the caller", body = ApiResponse<UnreadCountResponse>)
    )
)]
pub async fn get_unread_count(
    Extension(service): Extension<DynMessageService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.unread_message_count(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/messages/with/{id}",
    tag = "Message",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Chat partner user ID"), PageRequest),
    responses(
        (status = 200, description = "Conversation, newest first; incoming messages are marked read", body = ApiResponsePagination<Vec<MessageResponse>>)
    )
)]
pub async fn get_conversation(
    Extension(service): Extension<DynMessageService>,
    Extension(actor): Extension<Actor>,
    Path(partner_id): Path<i64>,
    Query(params): Query<PageRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.conversation(&actor, partner_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/messages/{id}/read",
    tag = "Message",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked read", body = ApiResponse<MessageResponse>),
        (status = 404, description = "Message not found", body = ErrorResponse)
    )
)]
pub async fn mark_message_read(
    Extension(service): Extension<DynMessageService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.mark_message_read(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn message_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/messages", post(send_message))
        .route("/api/messages/conversations", get(get_conversations))
        .route("/api/messages/unread-count", get(get_unread_count))
        .route("/api/messages/with/{id}", get(get_conversation))
        .route("/api/messages/{id}/read", put(mark_message_read))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.message_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
