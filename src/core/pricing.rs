//! Duty and landed-cost computation.
//!
//! Pure functions over a product snapshot. No rounding happens here;
//! presentation rounds to 2 decimals when displaying. Duty-rate text is
//! parsed into [`crate::core::product::DutyRate`] at the boundary, so the
//! computation itself cannot fail.

use serde::{Deserialize, Serialize};

use crate::core::order::ShippingTerm;
use crate::core::product::Product;

/// Seller-side totals for an order line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub duty: f64,
    pub total: f64,
}

/// Compute the totals for `quantity` units of `product` under the given
/// shipping term.
///
/// Under DDP the seller bears import duty, so it is added to the total;
/// under DAP the buyer pays duty at destination and the seller-side total is
/// the bare subtotal. Deterministic and side-effect free: the output is
/// snapshotted onto orders at creation and must never drift.
pub fn compute_order_totals(product: &Product, quantity: u32, term: ShippingTerm) -> OrderTotals {
    let subtotal = product.base_price * f64::from(quantity);
    let duty = match term {
        ShippingTerm::Ddp => subtotal * product.duty_rate.fraction(),
        ShippingTerm::Dap => 0.0,
    };
    OrderTotals {
        subtotal,
        duty,
        total: subtotal + duty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::ProductId;
    use crate::core::product::ProductDraft;
    use chrono::Utc;

    fn product(base_price: f64, duty_rate: &str) -> Product {
        Product::new(
            ProductId::new(),
            ProductDraft {
                name: "Cotton t-shirts".to_string(),
                hs_code: "610910".to_string(),
                duty_rate: duty_rate.parse().unwrap(),
                base_price,
                destination_country: "USA".to_string(),
                incentive_info: String::new(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_ddp_totals() {
        let totals = compute_order_totals(&product(100.0, "10%"), 2, ShippingTerm::Ddp);
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.duty, 20.0);
        assert_eq!(totals.total, 220.0);
    }

    #[test]
    fn test_dap_excludes_duty_regardless_of_rate() {
        for rate in ["0%", "10%", "150%"] {
            let totals = compute_order_totals(&product(100.0, rate), 3, ShippingTerm::Dap);
            assert_eq!(totals.duty, 0.0);
            assert_eq!(totals.total, totals.subtotal);
        }
    }

    #[test]
    fn test_totals_are_deterministic() {
        let p = product(42.5, "7.5%");
        let a = compute_order_totals(&p, 7, ShippingTerm::Ddp);
        let b = compute_order_totals(&p, 7, ShippingTerm::Ddp);
        assert_eq!(a, b);
    }
}
