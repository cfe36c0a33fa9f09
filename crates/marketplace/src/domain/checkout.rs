//! Pure checkout planning: validates locked products against the cart and
//! prices the order. Storage backends call this while holding their locks.

use crate::model::product::Product;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::utils::generate_random_digits;
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    Unavailable,
    InsufficientStock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvalidCartItem {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub reason: InvalidReason,
    pub available: i32,
    pub requested: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedLine {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
    pub product_id: i64,
    pub seller_id: i64,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub lines: Vec<PlannedLine>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CheckoutPlan {
    pub fn seller_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.lines.iter().map(|l| l.seller_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `(tax, total)` for a subtotal and shipping cost.
pub fn price_totals(subtotal: Decimal, shipping_cost: Decimal, tax_rate: Decimal) -> (Decimal, Decimal) {
    let tax = round_money(subtotal * tax_rate);
    (tax, subtotal + shipping_cost + tax)
}

/// Every violation is collected so the caller sees the full list at once.
pub fn plan_checkout(
    requested: &[RequestedLine],
    products: &HashMap<i64, Product>,
    shipping_cost: Decimal,
    tax_rate: Decimal,
) -> Result<CheckoutPlan, Vec<InvalidCartItem>> {
    let mut violations = Vec::new();
    let mut lines = Vec::with_capacity(requested.len());

    for line in requested {
        let Some(product) = products.get(&line.product_id) else {
            violations.push(InvalidCartItem {
                product_id: line.product_id,
                product_name: None,
                reason: InvalidReason::Unavailable,
                available: 0,
                requested: line.quantity,
            });
            continue;
        };

        if !product.is_listed() {
            violations.push(InvalidCartItem {
                product_id: product.id,
                product_name: Some(product.name.clone()),
                reason: InvalidReason::Unavailable,
                available: product.stock,
                requested: line.quantity,
            });
            continue;
        }

        if product.stock < line.quantity {
            violations.push(InvalidCartItem {
                product_id: product.id,
                product_name: Some(product.name.clone()),
                reason: InvalidReason::InsufficientStock,
                available: product.stock,
                requested: line.quantity,
            });
            continue;
        }

        lines.push(PlannedLine {
            product_id: product.id,
            seller_id: product.seller_id,
            product_name: product.name.clone(),
            price: product.price,
            quantity: line.quantity,
            subtotal: product.price * Decimal::from(line.quantity),
        });
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let subtotal: Decimal = lines.iter().map(|l| l.subtotal).sum();
    let (tax, total) = price_totals(subtotal, shipping_cost, tax_rate);

    Ok(CheckoutPlan {
        lines,
        subtotal,
        shipping_cost,
        tax,
        total,
    })
}

pub const ORDER_NUMBER_ATTEMPTS: usize = 10;

/// `ORD` + date + four random digits. Callers retry on collision.
pub fn generate_order_number(date: NaiveDate) -> anyhow::Result<String> {
    Ok(format!(
        "ORD{}{}",
        date.format("%Y%m%d"),
        generate_random_digits(4)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sqlx::types::Json;

    fn product(id: i64, seller_id: i64, price: Decimal, stock: i32) -> Product {
        Product {
            id,
            seller_id,
            category_id: 1,
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: None,
            price,
            stock,
            images: Json(vec![]),
            weight_grams: None,
            fish_type: crate::domain::enums::FishType::Fresh,
            species: None,
            rating_avg: Decimal::ZERO,
            review_count: 0,
            active: true,
            featured: false,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    fn catalog(products: Vec<Product>) -> HashMap<i64, Product> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn totals_are_exact_sums() {
        let products = catalog(vec![
            product(1, 10, dec!(12.50), 5),
            product(2, 11, dec!(3.35), 9),
        ]);
        let plan = plan_checkout(
            &[
                RequestedLine { product_id: 1, quantity: 3 },
                RequestedLine { product_id: 2, quantity: 2 },
            ],
            &products,
            dec!(15.00),
            dec!(0.11),
        )
        .unwrap();

        assert_eq!(plan.subtotal, dec!(44.20));
        assert_eq!(plan.tax, dec!(4.86));
        assert_eq!(plan.total, plan.subtotal + plan.shipping_cost + plan.tax);
        assert_eq!(plan.total, dec!(64.06));
        assert_eq!(plan.seller_ids(), vec![10, 11]);
    }

    #[test]
    fn zero_tax_rate_adds_nothing() {
        let products = catalog(vec![product(1, 10, dec!(20000), 5)]);
        let plan = plan_checkout(
            &[RequestedLine { product_id: 1, quantity: 3 }],
            &products,
            dec!(10000),
            Decimal::ZERO,
        )
        .unwrap();

        assert_eq!(plan.tax, Decimal::ZERO);
        assert_eq!(plan.total, dec!(70000));
    }

    #[test]
    fn collects_every_violation() {
        let mut inactive = product(2, 10, dec!(5), 10);
        inactive.active = false;
        let products = catalog(vec![product(1, 10, dec!(5), 1), inactive]);

        let violations = plan_checkout(
            &[
                RequestedLine { product_id: 1, quantity: 2 },
                RequestedLine { product_id: 2, quantity: 1 },
                RequestedLine { product_id: 3, quantity: 1 },
            ],
            &products,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap_err();

        let reasons: Vec<(i64, InvalidReason)> =
            violations.iter().map(|v| (v.product_id, v.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (1, InvalidReason::InsufficientStock),
                (2, InvalidReason::Unavailable),
                (3, InvalidReason::Unavailable),
            ]
        );
        assert_eq!(violations[0].available, 1);
        assert_eq!(violations[0].requested, 2);
    }

    #[test]
    fn order_number_has_date_and_four_digits() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let number = generate_order_number(date).unwrap();

        assert!(number.starts_with("ORD20260309"));
        assert_eq!(number.len(), "ORD20260309".len() + 4);
    }
}
