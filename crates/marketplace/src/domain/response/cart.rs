use crate::{domain::cart::InvalidCartLine, model::cart::CartLine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub seller_id: i64,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    pub available_stock: i32,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.item_id,
            product_id: line.product_id,
            product_name: line.product_name,
            seller_id: line.seller_id,
            unit_price: line.price,
            quantity: line.quantity,
            subtotal: line.price * Decimal::from(line.quantity),
            available_stock: line.stock,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub cart_id: i64,
    pub items: Vec<CartItemResponse>,
    pub invalid_items: Vec<InvalidCartLine>,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub item_count: i32,
}

impl CartResponse {
    pub fn build(cart_id: i64, lines: Vec<CartLine>, invalid_items: Vec<InvalidCartLine>) -> Self {
        let items: Vec<CartItemResponse> = lines.into_iter().map(Into::into).collect();
        let total_price = items.iter().map(|i| i.subtotal).sum();
        let item_count = items.iter().map(|i| i.quantity).sum();

        Self {
            cart_id,
            items,
            invalid_items,
            total_price,
            item_count,
        }
    }
}
