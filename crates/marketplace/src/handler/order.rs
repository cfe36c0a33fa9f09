use crate::{
    abstract_trait::order::DynOrderService,
    domain::{
        actor::Actor,
        requests::order::{
            CheckoutRequest, FindAllOrders, RecordPaymentRequest, UpdateOrderStatusRequest,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            order::{OrderDetailResponse, OrderItemResponse, OrderResponse},
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
    path = "/api/orders/checkout",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed from the cart", body = ApiResponse<OrderDetailResponse>),
        (status = 400, description = "Empty cart or unavailable items", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn checkout(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CheckoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.checkout(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "The caller's orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_orders(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Orders containing the seller's products", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 403, description = "Seller only", body = ErrorResponse)
    )
)]
pub async fn get_seller_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seller_orders(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_order(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/items",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order lines", body = ApiResponse<Vec<OrderItemResponse>>),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order_items(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.order_items(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/cancel",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order canceled and stock restored", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Order can no longer be canceled", body = ErrorResponse),
        (status = 403, description = "Caller may not cancel", body = ErrorResponse)
    )
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_order(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Transition not allowed", body = ErrorResponse),
        (status = 403, description = "Caller may not take this transition", body = ErrorResponse)
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_order_status(&actor, id, body.status).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/complete",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Delivery confirmed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Order is not shipped", body = ErrorResponse)
    )
)]
pub async fn complete_order(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.complete_order(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/payment",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Admin only", body = ErrorResponse)
    )
)]
pub async fn record_payment(
    Extension(service): Extension<DynOrderService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<RecordPaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .record_payment(&actor, id, &body.payment_reference)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders/checkout", post(checkout))
        .route("/api/orders", get(get_orders))
        .route("/api/seller/orders", get(get_seller_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/items", get(get_order_items))
        .route("/api/orders/{id}/cancel", put(cancel_order))
        .route("/api/orders/{id}/status", put(update_order_status))
        .route("/api/orders/{id}/complete", put(complete_order))
        .route("/api/orders/{id}/payment", put(record_payment))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
