use crate::domain::{
    enums::{OrderStatus, PaymentStatus, SortDirection},
    requests::{default_page, default_page_size, non_negative_amount},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    /// One of the buyer's saved addresses.
    #[validate(range(min = 1, message = "Shipping address is required"))]
    pub address_id: i64,

    #[validate(length(min = 1, max = 50, message = "Shipping method is required"))]
    #[schema(example = "regular")]
    pub shipping_method: String,

    #[validate(custom(function = "non_negative_amount"))]
    #[schema(value_type = String, example = "15000.00")]
    pub shipping_cost: Decimal,

    #[validate(length(min = 1, max = 50, message = "Payment method is required"))]
    #[schema(example = "bank_transfer")]
    pub payment_method: String,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderSort {
    OrderNumber,
    Total,
    Status,
    #[default]
    CreatedAt,
}

impl OrderSort {
    pub const fn column(&self) -> &'static str {
        match self {
            OrderSort::OrderNumber => "o.order_number",
            OrderSort::Total => "o.total",
            OrderSort::Status => "o.status",
            OrderSort::CreatedAt => "o.created_at",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    pub status: Option<OrderStatus>,

    #[serde(default)]
    pub sort_by: OrderSort,

    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for FindAllOrders {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
            sort_by: OrderSort::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub sort_by: OrderSort,
    pub sort_direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordPaymentRequest {
    #[validate(length(min = 1, max = 100, message = "Payment reference is required"))]
    #[schema(example = "TRX-88271")]
    pub payment_reference: String,
}

/// Input to the checkout transaction.
#[derive(Debug, Clone)]
pub struct PlaceOrderRecord {
    pub buyer_id: i64,
    pub address_id: i64,
    /// Snapshot of the address at checkout; later edits do not touch it.
    pub shipping_address: String,
    pub shipping_method: String,
    pub shipping_cost: Decimal,
    pub payment_method: String,
    pub notes: Option<String>,
    pub tax_rate: Decimal,
}

/// Guarded status change: applied only while the order is still in
/// `expected`. Moving to `Canceled` returns every item's stock.
#[derive(Debug, Clone)]
pub struct StatusChangeRecord {
    pub order_id: i64,
    pub expected: OrderStatus,
    pub next: OrderStatus,
    pub payment_status: Option<PaymentStatus>,
}

impl StatusChangeRecord {
    pub fn restocks(&self) -> bool {
        self.next == OrderStatus::Canceled
    }
}
