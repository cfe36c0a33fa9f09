use crate::domain::enums::OrderStatus;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Headline figures over one seller's catalog and order lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct SellerTotals {
    /// Line subtotals of paid orders only.
    pub total_revenue: Decimal,
    pub order_count: i64,
    pub product_count: i64,
    pub out_of_stock_count: i64,
    pub unreplied_review_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct DailySales {
    pub day: NaiveDate,
    pub revenue: Decimal,
}

/// One of the seller's order lines with the order fields shown beside it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SellerOrderLine {
    pub item_id: i64,
    pub order_id: i64,
    pub order_number: String,
    pub buyer_id: i64,
    pub status: OrderStatus,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub subtotal: Decimal,
    pub created_at: Option<NaiveDateTime>,
}
