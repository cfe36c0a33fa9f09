use crate::model::{
    appointment::Appointment,
    dashboard::{DailySales, SellerOrderLine, SellerTotals, StatusCount},
    review::RatingCount,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynDashboardStore = Arc<dyn DashboardStoreTrait + Send + Sync>;

/// Read-only aggregates for the seller dashboard.
#[async_trait]
pub trait DashboardStoreTrait {
    async fn seller_totals(&self, seller_id: i64) -> Result<SellerTotals, RepositoryError>;
    async fn seller_rating_counts(&self, seller_id: i64)
    -> Result<Vec<RatingCount>, RepositoryError>;
    /// Distinct orders per status; statuses without orders are omitted.
    async fn seller_status_counts(&self, seller_id: i64)
    -> Result<Vec<StatusCount>, RepositoryError>;
    /// Paid revenue per order creation day, from `since` onward.
    async fn seller_daily_sales(
        &self,
        seller_id: i64,
        since: NaiveDate,
    ) -> Result<Vec<DailySales>, RepositoryError>;
    async fn seller_latest_lines(
        &self,
        seller_id: i64,
        limit: i64,
    ) -> Result<Vec<SellerOrderLine>, RepositoryError>;
    /// Waiting or confirmed appointments at or after `from`, soonest first.
    async fn seller_upcoming_appointments(
        &self,
        seller_id: i64,
        from: NaiveDateTime,
        limit: i64,
    ) -> Result<Vec<Appointment>, RepositoryError>;
}
