use crate::domain::{
    actor::Actor,
    response::{api::ApiResponse, dashboard::SellerDashboardResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynDashboardService = Arc<dyn DashboardServiceTrait + Send + Sync>;

#[async_trait]
pub trait DashboardServiceTrait {
    async fn seller_dashboard(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<SellerDashboardResponse>, ServiceError>;
}
