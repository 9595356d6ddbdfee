//! Cartwheel Core - Shared domain library.
//!
//! This crate provides the types and pure logic shared by the Cartwheel
//! components:
//! - `server` - HTTP JSON API backend
//! - `client` - Consuming client library (cart state, checkout)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. The pricing engine lives here so the
//! server's authoritative recompute and the client's local estimate run the
//! exact same arithmetic.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`model`] - Products, cart entries, orders and their line items
//! - [`pricing`] - Subtotal/shipping/tax computation over authoritative prices
//! - [`request`] - Order request DTO and shape validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod model;
pub mod pricing;
pub mod request;
pub mod types;

pub use model::{CartEntry, Order, OrderLineItem, OrderStatus, Product};
pub use pricing::{PriceBreakdown, PricingError, price_items};
pub use request::{OrderItemRequest, OrderRequest, OrderRequestError};
pub use types::*;
