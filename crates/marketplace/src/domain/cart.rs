use crate::model::cart::CartLine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CartIssue {
    #[serde(rename = "out of stock")]
    OutOfStock,
    #[serde(rename = "product inactive")]
    ProductInactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvalidCartLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub reason: CartIssue,
}

/// Outcome of checking cart lines against current product state.
#[derive(Debug, Default)]
pub struct Reconciled {
    pub valid: Vec<CartLine>,
    pub invalid: Vec<InvalidCartLine>,
    /// `(item_id, new_quantity)` for lines lowered to the available stock.
    pub lowered: Vec<(i64, i32)>,
}

impl Reconciled {
    pub fn pruned_ids(&self) -> Vec<i64> {
        self.invalid.iter().map(|i| i.id).collect()
    }
}

pub fn reconcile(lines: Vec<CartLine>) -> Reconciled {
    let mut out = Reconciled::default();

    for mut line in lines {
        let issue = if !line.active || line.deleted {
            Some(CartIssue::ProductInactive)
        } else if line.stock <= 0 {
            Some(CartIssue::OutOfStock)
        } else {
            None
        };

        if let Some(reason) = issue {
            out.invalid.push(InvalidCartLine {
                id: line.item_id,
                product_id: line.product_id,
                product_name: line.product_name,
                reason,
            });
            continue;
        }

        if line.quantity > line.stock {
            line.quantity = line.stock;
            out.lowered.push((line.item_id, line.stock));
        }

        out.valid.push(line);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line(item_id: i64, quantity: i32, stock: i32, active: bool) -> CartLine {
        CartLine {
            item_id,
            product_id: item_id * 10,
            quantity,
            product_name: format!("Item {item_id}"),
            seller_id: 1,
            price: Decimal::ONE,
            stock,
            active,
            deleted: false,
        }
    }

    #[test]
    fn prunes_inactive_and_empty_products() {
        let result = reconcile(vec![line(1, 1, 5, true), line(2, 1, 5, false), line(3, 2, 0, true)]);

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.pruned_ids(), vec![2, 3]);
        assert_eq!(result.invalid[0].reason, CartIssue::ProductInactive);
        assert_eq!(result.invalid[1].reason, CartIssue::OutOfStock);
    }

    #[test]
    fn lowers_quantity_above_stock() {
        let result = reconcile(vec![line(1, 8, 3, true)]);

        assert_eq!(result.valid[0].quantity, 3);
        assert_eq!(result.lowered, vec![(1, 3)]);
    }

    #[test]
    fn reasons_serialize_as_phrases() {
        let json = serde_json::to_string(&CartIssue::OutOfStock).unwrap();
        assert_eq!(json, "\"out of stock\"");
    }
}
