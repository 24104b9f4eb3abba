//! Orders and their lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::core::error::{CoreError, CoreResult};
use crate::core::id::OrderId;
use crate::core::pricing::{OrderTotals, compute_order_totals};
use crate::core::product::Product;

/// Incoterms shipping term. DDP: seller bears import duty. DAP: buyer pays
/// duty at destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShippingTerm {
    Ddp,
    Dap,
}

impl Display for ShippingTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ShippingTerm::Ddp => "DDP",
                ShippingTerm::Dap => "DAP",
            }
        )
    }
}

impl FromStr for ShippingTerm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DDP" => Ok(ShippingTerm::Ddp),
            "DAP" => Ok(ShippingTerm::Dap),
            _ => Err(CoreError::validation(format!(
                "invalid shipping term: {s:?} (expected DDP or DAP)"
            ))),
        }
    }
}

/// Order fulfilment status. Strictly forward-moving:
/// pending → processing → completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OrderStatus::Pending => "pending",
                OrderStatus::Processing => "processing",
                OrderStatus::Completed => "completed",
            }
        )
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(CoreError::validation(format!(
                "invalid order status: {s:?}"
            ))),
        }
    }
}

/// An export order.
///
/// Holds an embedded snapshot of the product as it was at order time, not a
/// live reference: later edits or deletion of the source product do not
/// change this order. Totals are frozen from the pricing engine's output at
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product: Product,
    pub quantity: u32,
    pub shipping_term: ShippingTerm,
    pub shipping_address: String,
    pub subtotal: f64,
    pub duty_amount: f64,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn place(
        id: OrderId,
        product: Product,
        quantity: u32,
        shipping_term: ShippingTerm,
        shipping_address: String,
        created_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if quantity == 0 {
            return Err(CoreError::validation("quantity must be positive"));
        }
        if shipping_address.trim().is_empty() {
            return Err(CoreError::validation(
                "shipping address must not be empty",
            ));
        }

        let OrderTotals {
            subtotal,
            duty,
            total,
        } = compute_order_totals(&product, quantity, shipping_term);

        Ok(Self {
            id,
            product,
            quantity,
            shipping_term,
            shipping_address,
            subtotal,
            duty_amount: duty,
            total_amount: total,
            status: OrderStatus::Pending,
            created_at,
        })
    }

    /// Move the order to `next`. Regressions are rejected; setting the
    /// current status again is a no-op.
    pub fn advance(&mut self, next: OrderStatus) -> CoreResult<()> {
        if next < self.status {
            return Err(CoreError::validation(format!(
                "order status cannot move back from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::ProductId;
    use crate::core::product::ProductDraft;

    fn sample_product() -> Product {
        Product::new(
            ProductId::new(),
            ProductDraft {
                name: "Leather wallets".to_string(),
                hs_code: "420231".to_string(),
                duty_rate: "8%".parse().unwrap(),
                base_price: 50.0,
                destination_country: "Germany".to_string(),
                incentive_info: String::new(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn sample_order() -> Order {
        Order::place(
            OrderId::new(),
            sample_product(),
            4,
            ShippingTerm::Ddp,
            "12 Hafenstrasse, Hamburg".to_string(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_totals_frozen_at_creation() {
        let order = sample_order();
        assert_eq!(order.subtotal, 200.0);
        assert_eq!(order.duty_amount, 16.0);
        assert_eq!(order.total_amount, 216.0);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_rejects_zero_quantity_and_blank_address() {
        assert!(
            Order::place(
                OrderId::new(),
                sample_product(),
                0,
                ShippingTerm::Dap,
                "somewhere".to_string(),
                Utc::now(),
            )
            .is_err()
        );
        assert!(
            Order::place(
                OrderId::new(),
                sample_product(),
                1,
                ShippingTerm::Dap,
                "  ".to_string(),
                Utc::now(),
            )
            .is_err()
        );
    }

    #[test]
    fn test_status_is_monotonic() {
        let mut order = sample_order();
        order.advance(OrderStatus::Processing).unwrap();
        order.advance(OrderStatus::Completed).unwrap();
        assert!(order.advance(OrderStatus::Pending).is_err());
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_same_status_is_a_no_op() {
        let mut order = sample_order();
        order.advance(OrderStatus::Pending).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_shipping_term_round_trips() {
        assert_eq!("ddp".parse::<ShippingTerm>().unwrap(), ShippingTerm::Ddp);
        assert_eq!(ShippingTerm::Dap.to_string(), "DAP");
        assert!("EXW".parse::<ShippingTerm>().is_err());
    }
}
