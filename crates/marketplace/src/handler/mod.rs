mod address;
mod appointment;
mod cart;
mod category;
mod dashboard;
mod message;
mod notification;
mod order;
mod product;
mod review;
mod seller_location;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use serde_json::json;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::address::address_routes;
pub use self::appointment::appointment_routes;
pub use self::cart::cart_routes;
pub use self::category::category_routes;
pub use self::dashboard::dashboard_routes;
pub use self::message::message_routes;
pub use self::notification::notification_routes;
pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::review::review_routes;
pub use self::seller_location::seller_location_routes;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        category::get_categories,
        category::get_category,
        category::create_category,

        product::get_products,
        product::get_featured_products,
        product::get_product,
        product::get_seller_products,
        product::create_product,
        product::update_product,
        product::delete_product,

        cart::get_cart,
        cart::add_cart_item,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,

        address::get_addresses,
        address::get_address,
        address::create_address,
        address::update_address,
        address::set_main_address,
        address::delete_address,

        order::checkout,
        order::get_orders,
        order::get_seller_orders,
        order::get_order,
        order::get_order_items,
        order::cancel_order,
        order::update_order_status,
        order::complete_order,
        order::record_payment,

        dashboard::get_seller_dashboard,

        review::get_product_reviews,
        review::create_review,
        review::get_my_reviews,
        review::get_review,
        review::update_review,
        review::delete_review,
        review::reply_review,

        seller_location::get_locations,
        seller_location::get_location,
        seller_location::get_my_locations,
        seller_location::create_location,
        seller_location::update_location,
        seller_location::delete_location,

        appointment::create_appointment,
        appointment::get_appointments,
        appointment::get_seller_appointments,
        appointment::get_appointment,
        appointment::update_appointment,
        appointment::delete_appointment,
        appointment::update_appointment_status,

        message::send_message,
        message::get_conversations,
        message::get_unread_count,
        message::get_conversation,
        message::mark_message_read,

        notification::get_notifications,
        notification::mark_notification_read,
        notification::mark_all_notifications_read,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Category", description = "Product categories"),
        (name = "Product", description = "Product catalog and seller listings"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Address", description = "Buyer shipping addresses"),
        (name = "Order", description = "Checkout and order lifecycle"),
        (name = "Seller Dashboard", description = "Seller sales and catalog summary"),
        (name = "Review", description = "Product reviews and seller replies"),
        (name = "Seller Location", description = "Meetup locations and operating hours"),
        (name = "Appointment", description = "Buyer and seller meetups"),
        (name = "Message", description = "Direct messages"),
        (name = "Notification", description = "In-app notifications"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )
        .body(Body::from(buffer))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub struct AppRouter;

impl AppRouter {
    /// The complete application: every API route, `/metrics`, `/health`
    /// and the Swagger UI.
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(shared_state.clone())
            .merge(category_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()))
            .merge(address_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(dashboard_routes(shared_state.clone()))
            .merge(review_routes(shared_state.clone()))
            .merge(seller_location_routes(shared_state.clone()))
            .merge(appointment_routes(shared_state.clone()))
            .merge(message_routes(shared_state.clone()))
            .merge(notification_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
