use crate::{
    domain::{
        enums::OrderStatus,
        response::{appointment::AppointmentResponse, timestamp},
    },
    model::dashboard::{DailySales, SellerOrderLine, StatusCount},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountResponse {
    pub status: OrderStatus,
    pub count: i64,
}

impl From<StatusCount> for StatusCountResponse {
    fn from(value: StatusCount) -> Self {
        Self {
            status: value.status,
            count: value.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailySalesResponse {
    #[schema(example = "2030-03-10")]
    pub date: String,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

impl From<DailySales> for DailySalesResponse {
    fn from(value: DailySales) -> Self {
        Self {
            date: value.day.to_string(),
            revenue: value.revenue,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerOrderLineResponse {
    pub id: i64,
    pub order_id: i64,
    pub order_number: String,
    pub buyer_id: i64,
    pub status: OrderStatus,
    pub product_name: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    pub created_at: Option<String>,
}

impl From<SellerOrderLine> for SellerOrderLineResponse {
    fn from(value: SellerOrderLine) -> Self {
        Self {
            id: value.item_id,
            order_id: value.order_id,
            order_number: value.order_number,
            buyer_id: value.buyer_id,
            status: value.status,
            product_name: value.product_name,
            quantity: value.quantity,
            price: value.price,
            subtotal: value.subtotal,
            created_at: timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerDashboardResponse {
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    pub order_count: i64,
    pub product_count: i64,
    pub out_of_stock_count: i64,
    #[schema(value_type = String, example = "4.5")]
    pub average_rating: Decimal,
    pub review_count: i64,
    pub unreplied_review_count: i64,
    pub orders_by_status: Vec<StatusCountResponse>,
    pub daily_sales: Vec<DailySalesResponse>,
    pub latest_items: Vec<SellerOrderLineResponse>,
    pub upcoming_appointments: Vec<AppointmentResponse>,
}
