//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::{AuthService, OrderService, TokenService};
use crate::store::{
    MemoryOrderStore, MemoryProductStore, MemoryUserStore, OrderStore, PgOrderStore,
    PgProductStore, PgUserStore, ProductStore, UserStore,
};

/// Cheap-to-clone handle to everything the route handlers need.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: ServerConfig,
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
    auth: AuthService,
    orders: OrderService,
    tokens: TokenService,
    pool: Option<PgPool>,
}

impl AppState {
    /// Postgres-backed state for production use.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let products: Arc<dyn ProductStore> = Arc::new(PgProductStore::new(pool.clone()));
        let orders: Arc<dyn OrderStore> = Arc::new(PgOrderStore::new(pool.clone()));
        let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
        Self::build(config, products, orders, users, Some(pool))
    }

    /// In-memory state, used by tests and local experiments. No database
    /// connection is made.
    #[must_use]
    pub fn in_memory(config: ServerConfig) -> Self {
        let products: Arc<dyn ProductStore> = Arc::new(MemoryProductStore::new());
        let orders: Arc<dyn OrderStore> = Arc::new(MemoryOrderStore::new());
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        Self::build(config, products, orders, users, None)
    }

    /// State over caller-provided store implementations.
    #[must_use]
    pub fn with_stores(
        config: ServerConfig,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self::build(config, products, orders, users, None)
    }

    fn build(
        config: ServerConfig,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        users: Arc<dyn UserStore>,
        pool: Option<PgPool>,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_secs);
        let auth = AuthService::new(Arc::clone(&users));
        let orders = OrderService::new(Arc::clone(&products), orders);

        Self {
            inner: Arc::new(Inner {
                config,
                products,
                users,
                auth,
                orders,
                tokens,
                pool,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
