use crate::{
    abstract_trait::dashboard::DynDashboardService,
    domain::{
        actor::Actor,
        response::{api::ApiResponse, dashboard::SellerDashboardResponse},
    },
    middleware::jwt::auth_middleware,
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/seller/dashboard",
    tag = "Seller Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sales, catalog and review summary", body = ApiResponse<SellerDashboardResponse>),
        (status = 403, description = "Seller only", body = ErrorResponse)
    )
)]
pub async fn get_seller_dashboard(
    Extension(service): Extension<DynDashboardService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seller_dashboard(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn dashboard_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/seller/dashboard", get(get_seller_dashboard))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.dashboard_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
