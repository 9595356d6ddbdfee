//! Order request DTO and shape validation.
//!
//! This is the wire shape of `POST /api/orders`, shared so the client's
//! cheap pre-check and the server's gate run identical rules. The submitted
//! `price` and `total` are advisory only: validation rejects malformed
//! requests early and cheaply, but monetary correctness comes from the
//! server-side recompute against authoritative prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// One requested line item. `product_id` is accepted as a JSON number or a
/// numeric string, since clients historically sent either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(deserialize_with = "deserialize_product_id")]
    pub product_id: ProductId,
    pub quantity: i64,
    /// Client-side unit price; advisory only, never used for money.
    pub price: Decimal,
}

/// A purported order, as submitted by a client.
///
/// Both fields are shape-lenient on the wire: a missing `items` array or a
/// missing `total` deserializes rather than failing, so [`Self::validate`]
/// can reject it with a field-level message instead of a parser error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    /// Client-side total; advisory only, never persisted.
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// Field-level rejection reasons for a malformed order request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderRequestError {
    #[error("Order must contain at least one item")]
    EmptyItems,

    #[error("Item quantity for product {product_id} must be a positive integer")]
    InvalidQuantity { product_id: ProductId },

    #[error("Item price for product {product_id} must be greater than 0")]
    InvalidPrice { product_id: ProductId },

    #[error("Valid total amount is required")]
    InvalidTotal,
}

impl OrderRequest {
    /// Check request shape: items non-empty, quantities positive integers,
    /// prices positive, total present and positive. Pure; does not consult
    /// any store and does not vouch for monetary correctness.
    ///
    /// # Errors
    ///
    /// Returns the first [`OrderRequestError`] encountered.
    pub fn validate(&self) -> Result<(), OrderRequestError> {
        if self.items.is_empty() {
            return Err(OrderRequestError::EmptyItems);
        }

        for item in &self.items {
            if item.quantity < 1 || item.quantity > i64::from(u32::MAX) {
                return Err(OrderRequestError::InvalidQuantity {
                    product_id: item.product_id,
                });
            }
            if item.price <= Decimal::ZERO {
                return Err(OrderRequestError::InvalidPrice {
                    product_id: item.product_id,
                });
            }
        }

        match self.total {
            Some(total) if total > Decimal::ZERO => Ok(()),
            _ => Err(OrderRequestError::InvalidTotal),
        }
    }

    /// The `(product_id, quantity)` pairs for pricing. Call after
    /// [`Self::validate`], which rejects quantities outside `u32` range;
    /// this conversion only clamps as a fallback.
    #[must_use]
    pub fn line_items(&self) -> Vec<(ProductId, u32)> {
        self.items
            .iter()
            .map(|item| {
                let quantity = u32::try_from(item.quantity).unwrap_or(u32::MAX);
                (item.product_id, quantity)
            })
            .collect()
    }
}

fn deserialize_product_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = ProductId;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a product id as an integer or numeric string")
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<ProductId, E> {
            Ok(ProductId::new(v))
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<ProductId, E> {
            i64::try_from(v)
                .map(ProductId::new)
                .map_err(|_| E::custom(format!("Invalid productId: {v}")))
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ProductId, E> {
            v.parse::<i64>()
                .map(ProductId::new)
                .map_err(|_| E::custom(format!("Invalid productId: {v}")))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i64, quantity: i64, price: &str) -> OrderItemRequest {
        OrderItemRequest {
            product_id: ProductId::new(id),
            quantity,
            price: price.parse().unwrap(),
        }
    }

    fn request(items: Vec<OrderItemRequest>, total: &str) -> OrderRequest {
        OrderRequest {
            items,
            total: Some(total.parse().unwrap()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request(vec![item(1, 2, "50"), item(2, 1, "150")], "270");
        assert!(req.validate().is_ok());
        assert_eq!(
            req.line_items(),
            vec![(ProductId::new(1), 2), (ProductId::new(2), 1)]
        );
    }

    #[test]
    fn test_empty_items_rejected() {
        let req = request(vec![], "10");
        assert_eq!(req.validate().unwrap_err(), OrderRequestError::EmptyItems);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let req = request(vec![item(5, 0, "10")], "10");
        assert_eq!(
            req.validate().unwrap_err(),
            OrderRequestError::InvalidQuantity {
                product_id: ProductId::new(5)
            }
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let req = request(vec![item(5, 1, "-10")], "10");
        assert_eq!(
            req.validate().unwrap_err(),
            OrderRequestError::InvalidPrice {
                product_id: ProductId::new(5)
            }
        );
    }

    #[test]
    fn test_nonpositive_total_rejected() {
        let req = request(vec![item(5, 1, "10")], "0");
        assert_eq!(req.validate().unwrap_err(), OrderRequestError::InvalidTotal);
    }

    #[test]
    fn test_missing_total_deserializes_and_is_rejected() {
        let json = r#"{"items":[{"productId":1,"quantity":1,"price":10}]}"#;
        let req: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.total, None);
        assert_eq!(req.validate().unwrap_err(), OrderRequestError::InvalidTotal);
    }

    #[test]
    fn test_missing_items_deserializes_and_is_rejected() {
        let req: OrderRequest = serde_json::from_str(r#"{"total":10}"#).unwrap();
        assert!(req.items.is_empty());
        assert_eq!(req.validate().unwrap_err(), OrderRequestError::EmptyItems);
    }

    #[test]
    fn test_product_id_from_number_or_string() {
        let json = r#"{"items":[{"productId":3,"quantity":1,"price":10},
                                {"productId":"4","quantity":2,"price":"5.50"}],
                       "total":21}"#;
        let req: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.items[0].product_id, ProductId::new(3));
        assert_eq!(req.items[1].product_id, ProductId::new(4));
        assert_eq!(req.items[1].price, Decimal::new(5_50, 2));
    }

    #[test]
    fn test_non_numeric_product_id_rejected() {
        let json = r#"{"items":[{"productId":"abc","quantity":1,"price":10}],"total":10}"#;
        let err = serde_json::from_str::<OrderRequest>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid productId: abc"));
    }
}
