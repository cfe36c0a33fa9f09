use crate::{
    abstract_trait::review::DynReviewService,
    domain::{
        actor::Actor,
        requests::{
            PageRequest,
            review::{
                CreateReviewRequest, FindProductReviews, ReplyReviewRequest, UpdateReviewRequest,
            },
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            review::{ProductReviewsResponse, ReviewReplyResponse, ReviewResponse},
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
    path = "/api/products/{id}/reviews",
    tag = "Review",
    params(("id" = i64, Path, description = "Product ID"), FindProductReviews),
    responses(
        (status = 200, description = "Reviews with rating summary", body = ApiResponsePagination<ProductReviewsResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product_reviews(
    Extension(service): Extension<DynReviewService>,
    Path(product_id): Path<i64>,
    Query(params): Query<FindProductReviews>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.product_reviews(product_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Review",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Product already reviewed", body = ErrorResponse),
        (status = 422, description = "Order item not eligible for review", body = ErrorResponse)
    )
)]
pub async fn create_review(
    Extension(service): Extension<DynReviewService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_review(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(PageRequest),
    responses(
        (status = 200, description = "Reviews written by the caller", body = ApiResponsePagination<Vec<ReviewResponse>>)
    )
)]
pub async fn get_my_reviews(
    Extension(service): Extension<DynReviewService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<PageRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.my_reviews(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review detail", body = ApiResponse<ReviewResponse>),
        (status = 403, description = "Neither author nor product seller", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    )
)]
pub async fn get_review(
    Extension(service): Extension<DynReviewService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_review(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewResponse>),
        (status = 403, description = "Not the author", body = ErrorResponse)
    )
)]
pub async fn update_review(
    Extension(service): Extension<DynReviewService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_review(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = serde_json::Value),
        (status = 403, description = "Not the author", body = ErrorResponse)
    )
)]
pub async fn delete_review(
    Extension(service): Extension<DynReviewService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_review(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/reviews/{id}/reply",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Review ID")),
    request_body = ReplyReviewRequest,
    responses(
        (status = 200, description = "Seller reply added or replaced", body = ApiResponse<ReviewReplyResponse>),
        (status = 403, description = "Not the product seller", body = ErrorResponse)
    )
)]
pub async fn reply_review(
    Extension(service): Extension<DynReviewService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<ReplyReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reply_review(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn review_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let service = app_state.di_container.review_service.clone();

    let public = OpenApiRouter::new()
        .route("/api/products/{id}/reviews", get(get_product_reviews))
        .layer(Extension(service.clone()));

    let protected = OpenApiRouter::new()
        .route("/api/reviews", post(create_review))
        .route("/api/reviews", get(get_my_reviews))
        .route("/api/reviews/{id}", get(get_review))
        .route("/api/reviews/{id}", put(update_review))
        .route("/api/reviews/{id}", delete(delete_review))
        .route("/api/reviews/{id}/reply", post(reply_review))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(service))
        .layer(Extension(app_state.jwt_config.clone()));

    public.merge(protected)
}
