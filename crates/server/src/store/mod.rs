//! Persistence layer: store traits plus Postgres and in-memory backends.
//!
//! Handlers and services depend only on the traits, so tests substitute
//! [`memory`] stores without touching a database. The Postgres backend uses
//! runtime-checked queries; row-level atomicity of the order-creation write
//! is delegated entirely to the database. No transaction spans the
//! read-prices-then-write-order sequence (see DESIGN.md).
//!
//! # Tables
//!
//! - `users` - accounts (unique email, argon2 password hash)
//! - `products` - authoritative catalog (name, price, category, image)
//! - `orders` - one row per order; line items are a JSONB snapshot
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p cartwheel-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use cartwheel_core::{Email, Order, OrderId, OrderLineItem, OrderStatus, Product, ProductId, UserId};

use crate::models::User;

pub use memory::{MemoryOrderStore, MemoryProductStore, MemoryUserStore};
pub use postgres::{PgOrderStore, PgProductStore, PgUserStore};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Catalog listing filters. Search is a naive case-insensitive substring
/// match on the product name.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// A product to insert (the store assigns the id).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
}

/// An order to persist (the store assigns id and creation timestamp).
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderLineItem>,
    pub total: Decimal,
    pub status: OrderStatus,
}

/// A user to insert (the store assigns id and creation timestamp).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Email,
    pub password_hash: String,
}

/// A stored user together with its password hash. Only the auth service
/// sees this; everything else works with [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Authoritative product catalog access.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List products matching the filter, in id order.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// Batched lookup by id. Unknown ids are simply absent from the result;
    /// callers diff requested against resolved ids.
    async fn find_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError>;

    /// Replace the whole catalog with the given products (seed operation).
    /// Returns the number of products inserted.
    async fn replace_all(&self, products: Vec<NewProduct>) -> Result<u64, StoreError>;
}

/// Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist one order; the store assigns id and `created_at`.
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// All orders for a user, most recent first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError>;

    /// One order, scoped to its owner. `None` if absent or owned by someone
    /// else (the two cases are deliberately indistinguishable).
    async fn find_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, StoreError>;
}

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`StoreError::Conflict`] if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Look up a user (with password hash) by email, for login.
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, StoreError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
}
