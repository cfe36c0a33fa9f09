use crate::{
    abstract_trait::seller_location::DynSellerLocationService,
    domain::{
        actor::Actor,
        requests::{
            PageRequest,
            seller_location::{
                CreateSellerLocationRequest, FindSellerLocations, UpdateSellerLocationRequest,
            },
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            seller_location::SellerLocationResponse,
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
    get,
    path = "/api/seller-locations",
    tag = "Seller Location",
    params(FindSellerLocations),
    responses(
        (status = 200, description = "Active meetup locations", body = ApiResponsePagination<Vec<SellerLocationResponse>>)
    )
)]
pub async fn get_locations(
    Extension(service): Extension<DynSellerLocationService>,
    Query(params): Query<FindSellerLocations>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_locations(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller-locations/{id}",
    tag = "Seller Location",
    params(("id" = i64, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location detail", body = ApiResponse<SellerLocationResponse>),
        (status = 404, description = "Location not found", body = ErrorResponse)
    )
)]
pub async fn get_location(
    Extension(service): Extension<DynSellerLocationService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_location(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/locations",
    tag = "Seller Location",
    security(("bearer_auth" = [])),
    params(PageRequest),
    responses(
        (status = 200, description = "The caller's locations", body = ApiResponsePagination<Vec<SellerLocationResponse>>)
    )
)]
pub async fn get_my_locations(
    Extension(service): Extension<DynSellerLocationService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<PageRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.my_locations(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/seller-locations",
    tag = "Seller Location",
    security(("bearer_auth" = [])),
    request_body = CreateSellerLocationRequest,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<SellerLocationResponse>),
        (status = 403, description = "Seller only", body = ErrorResponse),
        (status = 422, description = "Invalid operating hours", body = ErrorResponse)
    )
)]
pub async fn create_location(
    Extension(service): Extension<DynSellerLocationService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateSellerLocationRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_location(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/seller-locations/{id}",
    tag = "Seller Location",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Location ID")),
    request_body = UpdateSellerLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<SellerLocationResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn update_location(
    Extension(service): Extension<DynSellerLocationService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateSellerLocationRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_location(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/seller-locations/{id}",
    tag = "Seller Location",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted", body = serde_json::Value),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn delete_location(
    Extension(service): Extension<DynSellerLocationService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_location(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn seller_location_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let service = app_state.di_container.seller_location_service.clone();

    let public = OpenApiRouter::new()
        .route("/api/seller-locations", get(get_locations))
        .route("/api/seller-locations/{id}", get(get_location))
        .layer(Extension(service.clone()));

    let protected = OpenApiRouter::new()
        .route("/api/seller/locations", get(get_my_locations))
        .route("/api/seller-locations", post(create_location))
        .route("/api/seller-locations/{id}", put(update_location))
        .route("/api/seller-locations/{id}", delete(delete_location))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(service))
        .layer(Extension(app_state.jwt_config.clone()));

    public.merge(protected)
}
