//! Checkout orchestration: cart snapshot in, placed order out.

use rust_decimal::Decimal;

use cartwheel_core::{
    CartEntry, Order, OrderItemRequest, OrderRequest, ProductId, price_items,
};

use crate::api::{ApiError, ApiSession};
use crate::cart::CartStore;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing in the selection matched the cart.
    #[error("nothing selected for checkout")]
    EmptySelection,

    /// Local pre-validation failed before any request was made. Mirrors the
    /// server's own validation for UX only; the server remains authoritative.
    #[error("order total must be greater than zero")]
    InvalidTotal,

    /// The server rejected the order, or the request never got there. The
    /// message is surfaced verbatim.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives checkout against one session and one cart, keeping a local
/// most-recent-first order history.
pub struct Orchestrator {
    session: ApiSession,
    cart: CartStore,
    history: Vec<Order>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(session: ApiSession, cart: CartStore) -> Self {
        Self {
            session,
            cart,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub fn session(&self) -> &ApiSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ApiSession {
        &mut self.session
    }

    /// Orders placed through this orchestrator, most recent first.
    #[must_use]
    pub fn history(&self) -> &[Order] {
        &self.history
    }

    /// Replace the local history with the server's, which is already
    /// most-recent-first.
    pub async fn refresh_history(&mut self) -> Result<(), ApiError> {
        self.history = self.session.orders().await?;
        Ok(())
    }

    /// Place an order for the selected cart entries.
    ///
    /// The selection is snapshotted up front: entries added to the cart while
    /// the request is in flight are untouched, and on success only the
    /// snapshotted products are removed. On any failure the cart is left
    /// exactly as it was.
    pub async fn checkout(&mut self, selected: &[ProductId]) -> Result<Order, CheckoutError> {
        let snapshot = self.cart.snapshot(selected);
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }

        let items: Vec<(ProductId, u32)> = snapshot
            .iter()
            .map(|e| (e.product.id, e.quantity))
            .collect();
        let prices = snapshot
            .iter()
            .map(|e| (e.product.id, e.product.price))
            .collect();
        let breakdown = price_items(&items, &prices)
            .map_err(|_| CheckoutError::EmptySelection)?
            .rounded();
        if breakdown.total <= Decimal::ZERO {
            return Err(CheckoutError::InvalidTotal);
        }

        let request = OrderRequest {
            items: snapshot.iter().map(to_item_request).collect(),
            total: Some(breakdown.total),
        };

        let order = self.session.place_order(&request).await?;

        let placed: Vec<ProductId> = snapshot.iter().map(|e| e.product.id).collect();
        self.cart.remove_many(&placed);
        self.history.insert(0, order.clone());
        Ok(order)
    }
}

fn to_item_request(entry: &CartEntry) -> OrderItemRequest {
    OrderItemRequest {
        product_id: entry.product.id,
        quantity: i64::from(entry.quantity),
        price: entry.product.price,
    }
}
