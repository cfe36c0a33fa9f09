use crate::domain::enums::{OrderStatus, PaymentStatus};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub buyer_id: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub address_id: Option<i64>,
    pub shipping_address: String,
    pub shipping_method: String,
    pub shipping_cost: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub canceled_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub seller_id: i64,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub created_at: Option<NaiveDateTime>,
}

/// An order item together with the parent order fields reviews depend on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItemContext {
    pub item_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub order_status: OrderStatus,
}
