use crate::{
    abstract_trait::product::DynProductService,
    domain::{
        actor::Actor,
        requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        response::{
            api::{ApiResponse, ApiResponsePagination},
            product::{ProductDetailResponse, ProductResponse},
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
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "Active products in stock", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_products(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/featured",
    tag = "Product",
    responses(
        (status = 200, description = "Featured products", body = ApiResponse<Vec<ProductResponse>>)
    )
)]
pub async fn get_featured_products(
    Extension(service): Extension<DynProductService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.featured_products().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = String, Path, description = "Product ID or slug")),
    responses(
        (status = 200, description = "Product with related products", body = ApiResponse<ProductDetailResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductService>,
    Path(id_or_slug): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_product(&id_or_slug).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(FindAllProducts),
    responses(
        (status = 200, description = "The caller's own products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 403, description = "Seller only", body = ErrorResponse)
    )
)]
pub async fn get_seller_products(
    Extension(service): Extension<DynProductService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seller_products(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Seller only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_product(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = serde_json::Value),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_product(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let service = app_state.di_container.product_service.clone();

    let public = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products/featured", get(get_featured_products))
        .route("/api/products/{id}", get(get_product))
        .layer(Extension(service.clone()));

    let protected = OpenApiRouter::new()
        .route("/api/seller/products", get(get_seller_products))
        .route("/api/products", post(create_product))
        .route("/api/products/{id}", put(update_product))
        .route("/api/products/{id}", delete(delete_product))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(service))
        .layer(Extension(app_state.jwt_config.clone()));

    public.merge(protected)
}
