use crate::{
    domain::{
        enums::{OrderStatus, PaymentStatus},
        response::timestamp,
    },
    model::order::{Order, OrderItem},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
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
    #[schema(value_type = String)]
    pub shipping_cost: Decimal,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub tax: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub notes: Option<String>,
    pub completed_at: Option<String>,
    pub canceled_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        Self {
            id: value.id,
            order_number: value.order_number,
            buyer_id: value.buyer_id,
            status: value.status,
            payment_status: value.payment_status,
            payment_method: value.payment_method,
            payment_reference: value.payment_reference,
            address_id: value.address_id,
            shipping_address: value.shipping_address,
            shipping_method: value.shipping_method,
            shipping_cost: value.shipping_cost,
            subtotal: value.subtotal,
            tax: value.tax,
            total: value.total,
            notes: value.notes,
            completed_at: timestamp(value.completed_at),
            canceled_at: timestamp(value.canceled_at),
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub seller_id: i64,
    pub product_name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            seller_id: value.seller_id,
            product_name: value.product_name,
            price: value.price,
            quantity: value.quantity,
            subtotal: value.subtotal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

impl OrderDetailResponse {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            order: order.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
