use crate::{
    abstract_trait::category::DynCategoryService,
    domain::{
        actor::Actor,
        requests::category::CreateCategoryRequest,
        response::{
            api::ApiResponse,
            category::{CategoryDetailResponse, CategoryResponse},
        },
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
    routing::{get, post},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Category",
    responses(
        (status = 200, description = "Top-level categories with their children", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynCategoryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_categories().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Category",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category with parent and children", body = ApiResponse<CategoryDetailResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    Extension(service): Extension<DynCategoryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_category(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Category",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_category(
    Extension(service): Extension<DynCategoryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_category(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let service = app_state.di_container.category_service.clone();

    let public = OpenApiRouter::new()
        .route("/api/categories", get(get_categories))
        .route("/api/categories/{id}", get(get_category))
        .layer(Extension(service.clone()));

    let protected = OpenApiRouter::new()
        .route("/api/categories", post(create_category))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(service))
        .layer(Extension(app_state.jwt_config.clone()));

    public.merge(protected)
}
