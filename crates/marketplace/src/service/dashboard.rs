use crate::{
    abstract_trait::dashboard::{DashboardServiceTrait, DynDashboardStore},
    domain::{
        actor::{Actor, Role},
        dashboard::{
            LATEST_LINES, UPCOMING_APPOINTMENTS, fill_daily_sales, fill_status_counts,
            sales_window_start,
        },
        rating::RatingStats,
        response::{api::ApiResponse, dashboard::SellerDashboardResponse},
    },
    service::require_role,
};
use async_trait::async_trait;
use chrono::{Local, Utc};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};

#[derive(Clone)]
pub struct DashboardService {
    store: DynDashboardStore,
    tracer: ServiceTracer,
}

impl DashboardService {
    pub fn new(store: DynDashboardStore, registry: &mut Registry) -> Self {
        Self {
            store,
            tracer: ServiceTracer::new("dashboard_service", "DashboardService", registry),
        }
    }

    async fn build(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<SellerDashboardResponse>, ServiceError> {
        require_role(actor, Role::Seller, "view the seller dashboard")?;
        let seller_id = actor.user_id;

        // Order timestamps are UTC; appointment times are local wall-clock.
        let today = Utc::now().date_naive();
        let now_local = Local::now().naive_local();

        let totals = self.store.seller_totals(seller_id).await?;
        let ratings = RatingStats::from_counts(&self.store.seller_rating_counts(seller_id).await?);
        let statuses = self.store.seller_status_counts(seller_id).await?;
        let sales = self
            .store
            .seller_daily_sales(seller_id, sales_window_start(today))
            .await?;
        let latest = self.store.seller_latest_lines(seller_id, LATEST_LINES).await?;
        let upcoming = self
            .store
            .seller_upcoming_appointments(seller_id, now_local, UPCOMING_APPOINTMENTS)
            .await?;

        let dashboard = SellerDashboardResponse {
            total_revenue: totals.total_revenue,
            order_count: totals.order_count,
            product_count: totals.product_count,
            out_of_stock_count: totals.out_of_stock_count,
            average_rating: ratings.average,
            review_count: ratings.count,
            unreplied_review_count: totals.unreplied_review_count,
            orders_by_status: fill_status_counts(&statuses)
                .into_iter()
                .map(Into::into)
                .collect(),
            daily_sales: fill_daily_sales(&sales, today)
                .into_iter()
                .map(Into::into)
                .collect(),
            latest_items: latest.into_iter().map(Into::into).collect(),
            upcoming_appointments: upcoming.into_iter().map(Into::into).collect(),
        };

        Ok(ApiResponse::ok("Seller dashboard retrieved", dashboard))
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn seller_dashboard(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<SellerDashboardResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "seller_dashboard",
            vec![
                KeyValue::new("component", "dashboard"),
                KeyValue::new("seller_id", actor.user_id),
            ],
        );

        let result = self.build(actor).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller dashboard retrieved")
    }
}
