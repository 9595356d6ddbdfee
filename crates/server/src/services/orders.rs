//! Order placement and retrieval.
//!
//! Placement is the one write path in the system: validate the request,
//! re-price every line against the catalog, snapshot the priced lines, and
//! persist. Client-submitted prices and totals are advisory only.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use cartwheel_core::{
    Order, OrderId, OrderLineItem, OrderRequest, OrderRequestError, OrderStatus, PricingError,
    Product, ProductId, UserId, price_items,
};

use crate::store::{NewOrder, OrderStore, ProductStore, StoreError};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    InvalidRequest(#[from] OrderRequestError),

    /// One or more requested products do not exist. Carries every offending
    /// id, not just the first.
    #[error("Products not found: {}", join_ids(.0))]
    ProductsNotFound(Vec<ProductId>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Places and retrieves orders on behalf of an authenticated user.
#[derive(Clone)]
pub struct OrderService {
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { products, orders }
    }

    /// Validate, re-price, and persist an order.
    ///
    /// The persisted total is the server-computed one (subtotal plus shipping
    /// plus tax, rounded to cents). A disagreeing client total is logged and
    /// otherwise ignored. If any product id is unknown, nothing is persisted.
    pub async fn place_order(
        &self,
        user_id: UserId,
        request: &OrderRequest,
    ) -> Result<Order, OrderError> {
        request.validate()?;

        let line_items = request.line_items();
        let mut ids: Vec<ProductId> = Vec::new();
        for (id, _) in &line_items {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }

        let catalog: HashMap<ProductId, Product> = self
            .products
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let missing: Vec<ProductId> = ids
            .iter()
            .copied()
            .filter(|id| !catalog.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(OrderError::ProductsNotFound(missing));
        }

        let prices: HashMap<ProductId, Decimal> = catalog
            .iter()
            .map(|(id, product)| (*id, product.price))
            .collect();
        let breakdown = price_items(&line_items, &prices).map_err(|err| match err {
            PricingError::MissingProducts(ids) => OrderError::ProductsNotFound(ids),
            PricingError::EmptyItems => OrderError::InvalidRequest(OrderRequestError::EmptyItems),
        })?;
        let priced = breakdown.rounded();

        // validate() guarantees a total is present at this point
        if let Some(client_total) = request.total
            && client_total != priced.total
        {
            tracing::warn!(
                user_id = %user_id,
                client_total = %client_total,
                server_total = %priced.total,
                "client-submitted total disagrees with server pricing"
            );
        }

        let items: Vec<OrderLineItem> = line_items
            .iter()
            .filter_map(|(id, quantity)| {
                catalog.get(id).map(|product| OrderLineItem {
                    product_id: *id,
                    product_name: product.name.clone(),
                    quantity: *quantity,
                    price: product.price,
                    total: product.price * Decimal::from(*quantity),
                })
            })
            .collect();

        let order = self
            .orders
            .create(NewOrder {
                user_id,
                items,
                total: priced.total,
                status: OrderStatus::default(),
            })
            .await?;

        Ok(order)
    }

    /// All orders belonging to `user_id`, most recent first.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_by_user(user_id).await?)
    }

    /// A single order, only if it belongs to `user_id`. Absent and not-owned
    /// are indistinguishable.
    pub async fn find_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, OrderError> {
        Ok(self.orders.find_for_user(id, user_id).await?)
    }
}
