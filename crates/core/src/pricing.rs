//! Pricing engine: subtotal, shipping, tax, and total for a set of line items.
//!
//! Input is `(product_id, quantity)` pairs plus an authoritative price map.
//! Client-submitted prices never enter this module; callers look prices up
//! from the product store and pass only those. All arithmetic runs at full
//! `Decimal` precision; rounding happens once, at presentation time, via
//! [`PriceBreakdown::rounded`].

use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::ProductId;

/// Orders with a subtotal strictly above this amount ship free.
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::from(200)
}

/// Flat shipping rate charged at or below the free-shipping threshold.
#[must_use]
pub fn flat_shipping_rate() -> Decimal {
    Decimal::new(12_99, 2)
}

/// Sales tax rate applied to the subtotal.
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Errors from pricing a set of line items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// No line items were supplied. Callers validate request shape before
    /// pricing, but the engine refuses to price an empty basket regardless.
    #[error("cannot price an empty set of line items")]
    EmptyItems,

    /// One or more product ids have no authoritative price. The order must
    /// not proceed with an incomplete basket, so every offending id is
    /// reported rather than silently dropped.
    #[error("no authoritative price for product(s): {}", format_ids(.0))]
    MissingProducts(Vec<ProductId>),
}

fn format_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A full price computation, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Copy with every component rounded to 2 decimal places, for responses
    /// and display. Intermediate accumulation stays unrounded so per-line
    /// rounding error cannot compound.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: self.subtotal.round_dp(2),
            shipping: self.shipping.round_dp(2),
            tax: self.tax.round_dp(2),
            total: self.total.round_dp(2),
        }
    }
}

/// Price a set of line items against an authoritative price map.
///
/// - subtotal = sum of `price[id] * quantity` over all items
/// - shipping = 0 above the free-shipping threshold, flat rate otherwise
/// - tax = subtotal * tax rate
/// - total = subtotal + shipping + tax
///
/// # Errors
///
/// Returns [`PricingError::EmptyItems`] for an empty input and
/// [`PricingError::MissingProducts`] naming every id absent from `prices`.
pub fn price_items(
    items: &[(ProductId, u32)],
    prices: &HashMap<ProductId, Decimal>,
) -> Result<PriceBreakdown, PricingError> {
    if items.is_empty() {
        return Err(PricingError::EmptyItems);
    }

    let mut subtotal = Decimal::ZERO;
    let mut missing: Vec<ProductId> = Vec::new();

    for &(product_id, quantity) in items {
        match prices.get(&product_id) {
            Some(unit_price) => {
                subtotal += *unit_price * Decimal::from(quantity);
            }
            None => {
                if !missing.contains(&product_id) {
                    missing.push(product_id);
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(PricingError::MissingProducts(missing));
    }

    let shipping = if subtotal > free_shipping_threshold() {
        Decimal::ZERO
    } else {
        flat_shipping_rate()
    };
    let tax = subtotal * tax_rate();
    let total = subtotal + shipping + tax;

    Ok(PriceBreakdown {
        subtotal,
        shipping,
        tax,
        total,
    })
}
