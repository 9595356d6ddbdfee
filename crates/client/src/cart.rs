//! Local cart state with best-effort persistence.
//!
//! The cart is the client's own view of intent; the server never sees it
//! except as an order request at checkout. Every mutation writes the full
//! snapshot back to storage, and a failed write is logged and ignored so the
//! cart keeps working in memory for the session.

use std::sync::Arc;

use rust_decimal::Decimal;

use cartwheel_core::{CartEntry, PriceBreakdown, Product, ProductId, price_items};

use crate::storage::KeyValueStorage;

const CART_KEY: &str = "cart";

/// Mapping from product to desired quantity, unique per product.
pub struct CartStore {
    entries: Vec<CartEntry>,
    storage: Arc<dyn KeyValueStorage>,
}

impl CartStore {
    /// Restore the cart from storage, starting empty if there is no snapshot
    /// or it cannot be read.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let entries = match storage.get(CART_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding unreadable cart snapshot");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "cart storage unavailable, starting empty");
                Vec::new()
            }
        };
        Self { entries, storage }
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Merge `quantity` of `product` into the cart. Adding zero is a no-op.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.product.id == product.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.entries.push(CartEntry { product, quantity }),
        }
        self.persist();
    }

    /// Set the quantity for an existing entry. Anything below 1 removes the
    /// entry instead of keeping a zero-quantity line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product_id) {
            entry.quantity = quantity;
            self.persist();
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        let before = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Remove exactly the given products, leaving everything else untouched.
    /// Used after a successful checkout to drop the ordered subset.
    pub fn remove_many(&mut self, product_ids: &[ProductId]) {
        let before = self.entries.len();
        self.entries.retain(|e| !product_ids.contains(&e.product.id));
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Copies of the entries for the given products, in cart order. Entries
    /// missing from the cart are skipped.
    #[must_use]
    pub fn snapshot(&self, product_ids: &[ProductId]) -> Vec<CartEntry> {
        self.entries
            .iter()
            .filter(|e| product_ids.contains(&e.product.id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Local pricing preview using the cart's own product prices. `None` for
    /// an empty cart. The server recomputes all of this at checkout.
    #[must_use]
    pub fn summary(&self) -> Option<PriceBreakdown> {
        let items: Vec<(ProductId, u32)> = self
            .entries
            .iter()
            .map(|e| (e.product.id, e.quantity))
            .collect();
        let prices = self
            .entries
            .iter()
            .map(|e| (e.product.id, e.product.price))
            .collect();
        price_items(&items, &prices).ok()
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize cart snapshot");
                return;
            }
        };
        if let Err(err) = self.storage.set(CART_KEY, &raw) {
            tracing::warn!(error = %err, "failed to persist cart, continuing in memory");
        }
    }
}
