use crate::{
    abstract_trait::appointment::DynAppointmentService,
    domain::{
        actor::Actor,
        requests::appointment::{
            CreateAppointmentRequest, FindAppointments, FindSellerAppointments,
            UpdateAppointmentRequest, UpdateAppointmentStatusRequest,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            appointment::AppointmentResponse,
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
    routing::{delete, get, post, put},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment requested", body = ApiResponse<AppointmentResponse>),
        (status = 400, description = "Outside operating hours or location inactive", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_appointment(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_appointment(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    params(FindAppointments),
    responses(
        (status = 200, description = "Appointments the caller takes part in", body = ApiResponsePagination<Vec<AppointmentResponse>>)
    )
)]
pub async fn get_appointments(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindAppointments>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_appointments(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/appointments",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    params(FindSellerAppointments),
    responses(
        (status = 200, description = "The seller's schedule", body = ApiResponsePagination<Vec<AppointmentResponse>>),
        (status = 403, description = "Seller only", body = ErrorResponse)
    )
)]
pub async fn get_seller_appointments(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindSellerAppointments>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seller_appointments(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment detail", body = ApiResponse<AppointmentResponse>),
        (status = 403, description = "Not a participant", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    )
)]
pub async fn get_appointment(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_appointment(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment rescheduled", body = ApiResponse<AppointmentResponse>),
        (status = 400, description = "Appointment already closed or slot unavailable", body = ErrorResponse),
        (status = 403, description = "Buyer only", body = ErrorResponse)
    )
)]
pub async fn update_appointment(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateAppointmentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_appointment(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment deleted", body = serde_json::Value),
        (status = 400, description = "Only waiting appointments can be deleted", body = ErrorResponse),
        (status = 403, description = "Buyer only", body = ErrorResponse)
    )
)]
pub async fn delete_appointment(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_appointment(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    tag = "Appointment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<AppointmentResponse>),
        (status = 400, description = "Transition not allowed", body = ErrorResponse),
        (status = 403, description = "Caller may not take this transition", body = ErrorResponse)
    )
)]
pub async fn update_appointment_status(
    Extension(service): Extension<DynAppointmentService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateAppointmentStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update_appointment_status(&actor, id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn appointment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/appointments", post(create_appointment))
        .route("/api/appointments", get(get_appointments))
        .route("/api/seller/appointments", get(get_seller_appointments))
        .route("/api/appointments/{id}", get(get_appointment))
        .route("/api/appointments/{id}", put(update_appointment))
        .route("/api/appointments/{id}", delete(delete_appointment))
        .route("/api/appointments/{id}/status", put(update_appointment_status))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.appointment_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
