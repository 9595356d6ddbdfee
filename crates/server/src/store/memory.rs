//! In-memory store backends.
//!
//! Used by unit and integration tests, where a Postgres instance is not
//! available or wanted. Semantics mirror the Postgres backend: id
//! assignment from a counter, unique-email conflicts, most-recent-first
//! order listings.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use cartwheel_core::{Email, Order, OrderId, Product, ProductId, UserId};

use crate::models::User;

use super::{
    NewOrder, NewProduct, NewUser, OrderStore, ProductFilter, ProductStore, StoreError, UserRecord,
    UserStore,
};

/// In-memory [`ProductStore`].
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
    next_id: AtomicI64,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .lock()
            .map_err(|_| StoreError::DataCorruption("product store poisoned".to_owned()))?;

        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        Ok(products
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| &p.category == category)
            })
            .filter(|p| {
                search
                    .as_ref()
                    .is_none_or(|needle| p.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect())
    }

    async fn find_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .lock()
            .map_err(|_| StoreError::DataCorruption("product store poisoned".to_owned()))?;
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn replace_all(&self, new_products: Vec<NewProduct>) -> Result<u64, StoreError> {
        let mut products = self
            .products
            .lock()
            .map_err(|_| StoreError::DataCorruption("product store poisoned".to_owned()))?;
        products.clear();
        for new in new_products {
            let id = ProductId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
            products.push(Product {
                id,
                name: new.name,
                price: new.price,
                category: new.category,
                image: new.image,
            });
        }
        Ok(products.len() as u64)
    }
}

/// In-memory [`OrderStore`].
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI64,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Total number of stored orders, for assertions in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        self.orders
            .lock()
            .map(|orders| orders.len())
            .map_err(|_| StoreError::DataCorruption("order store poisoned".to_owned()))
    }

    /// Whether no orders are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| StoreError::DataCorruption("order store poisoned".to_owned()))?;
        let created = Order {
            id: OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            user_id: order.user_id,
            items: order.items,
            total: order.total,
            status: order.status,
            created_at: Utc::now(),
        };
        orders.push(created.clone());
        Ok(created)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        let orders = self
            .orders
            .lock()
            .map_err(|_| StoreError::DataCorruption("order store poisoned".to_owned()))?;
        let mut mine: Vec<Order> = orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        // Insertion order is creation order, so reversing gives newest first
        mine.reverse();
        Ok(mine)
    }

    async fn find_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, StoreError> {
        let orders = self
            .orders
            .lock()
            .map_err(|_| StoreError::DataCorruption("order store poisoned".to_owned()))?;
        Ok(orders
            .iter()
            .find(|o| o.id == id && o.user_id == user_id)
            .cloned())
    }
}

/// In-memory [`UserStore`].
pub struct MemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| StoreError::DataCorruption("user store poisoned".to_owned()))?;
        if users.iter().any(|r| r.user.email == user.email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }
        let created = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        users.push(UserRecord {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, StoreError> {
        let users = self
            .users
            .lock()
            .map_err(|_| StoreError::DataCorruption("user store poisoned".to_owned()))?;
        Ok(users.iter().find(|r| &r.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .lock()
            .map_err(|_| StoreError::DataCorruption("user store poisoned".to_owned()))?;
        Ok(users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone()))
    }
}
