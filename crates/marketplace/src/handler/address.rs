use crate::{
    abstract_trait::address::DynAddressService,
    domain::{
        actor::Actor,
        requests::address::{CreateAddressRequest, UpdateAddressRequest},
        response::{address::AddressResponse, api::ApiResponse},
    },
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/addresses",
    tag = "Address",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's addresses, main first", body = ApiResponse<Vec<AddressResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_addresses(
    Extension(service): Extension<DynAddressService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.my_addresses(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    tag = "Address",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address detail", body = ApiResponse<AddressResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse)
    )
)]
pub async fn get_address(
    Extension(service): Extension<DynAddressService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_address(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/addresses",
    tag = "Address",
    security(("bearer_auth" = [])),
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address saved", body = ApiResponse<AddressResponse>),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_address(
    Extension(service): Extension<DynAddressService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateAddressRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_address(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    tag = "Address",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Address ID")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<AddressResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn update_address(
    Extension(service): Extension<DynAddressService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateAddressRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_address(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/addresses/{id}/main",
    tag = "Address",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address is now the main one", body = ApiResponse<AddressResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn set_main_address(
    Extension(service): Extension<DynAddressService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.set_main_address(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    tag = "Address",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address deleted", body = serde_json::Value),
        (status = 400, description = "Address is used by an active order", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn delete_address(
    Extension(service): Extension<DynAddressService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_address(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn address_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/addresses", get(get_addresses))
        .route("/api/addresses", post(create_address))
        .route("/api/addresses/{id}", get(get_address))
        .route("/api/addresses/{id}", put(update_address))
        .route("/api/addresses/{id}", delete(delete_address))
        .route("/api/addresses/{id}/main", put(set_main_address))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.address_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
