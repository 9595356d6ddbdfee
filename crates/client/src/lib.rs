//! Client-side building blocks for the Cartwheel API.
//!
//! `ApiSession` talks to the server, `CartStore` keeps the local cart with
//! best-effort persistence, and `Orchestrator` ties the two together for
//! checkout. There is deliberately no global session object; callers
//! construct and pass an `ApiSession` so tests can substitute their own.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod retry;
pub mod storage;

pub use api::{ApiError, ApiSession, AuthUser};
pub use cart::CartStore;
pub use checkout::{CheckoutError, Orchestrator};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
