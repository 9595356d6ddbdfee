//! Domain model: products, cart entries, orders.
//!
//! Monetary amounts are `rust_decimal::Decimal` everywhere. Order line items
//! are snapshots taken at order-creation time; they never reference live
//! product rows, so later price or name edits cannot alter order history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, ProductId, UserId};

/// A catalog product. The authoritative copy lives server-side; clients
/// treat it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price, always positive.
    pub price: Decimal,
    pub category: String,
    /// Image URL for display.
    pub image: String,
}

/// One product/quantity pairing in a client cart.
///
/// Quantity is always >= 1; stores treat a quantity below 1 as a removal
/// rather than persisting a zero-quantity line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Line total at the cart's advisory price (UI display only; the server
    /// recomputes from its own prices at checkout).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Order lifecycle status.
///
/// Orders are created as `Processing`; transition logic is out of scope for
/// this service, so the other variants only appear if written out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// A line item frozen into an order at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    pub quantity: u32,
    /// Authoritative unit price at order time.
    pub price: Decimal,
    /// quantity x price, at order time.
    pub total: Decimal,
}

/// A placed order. Immutable once created; `total` is always the server's
/// recomputation, never a client-submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderLineItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            category: "Test".to_owned(),
            image: String::new(),
        }
    }

    #[test]
    fn test_cart_entry_line_total() {
        let entry = CartEntry {
            product: product(1, Decimal::new(1250, 2)),
            quantity: 3,
        };
        assert_eq!(entry.line_total(), Decimal::new(3750, 2));
    }

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("Pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_serde_names() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
    }

    #[test]
    fn test_line_item_wire_names() {
        let item = OrderLineItem {
            product_id: ProductId::new(9),
            product_name: "Yoga Mat".to_owned(),
            quantity: 1,
            price: Decimal::from(30),
            total: Decimal::from(30),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("productId").is_some());
        assert!(value.get("productName").is_some());
        assert!(value.get("product_id").is_none());
    }
}
