use crate::{
    abstract_trait::cart::DynCartService,
    domain::{
        actor::Actor,
        requests::cart::{AddCartItemRequest, UpdateCartItemRequest},
        response::{
            api::{ApiResponse, CountResponse},
            cart::CartResponse,
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
    routing::{delete, get, post, put},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current cart with totals", body = ApiResponse<CartResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddCartItemRequest,
    responses(
        (status = 201, description = "Item added", body = ApiResponse<CartResponse>),
        (status = 400, description = "Not enough stock", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Cart item ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartResponse>),
        (status = 400, description = "Not enough stock", body = ErrorResponse),
        (status = 404, description = "Cart item not found", body = ErrorResponse)
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart item not found", body = ErrorResponse)
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CountResponse>)
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.clear(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(get_cart))
        .route("/api/cart", delete(clear_cart))
        .route("/api/cart/items", post(add_cart_item))
        .route("/api/cart/items/{id}", put(update_cart_item))
        .route("/api/cart/items/{id}", delete(remove_cart_item))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
