//! Cartwheel server library.
//!
//! This crate provides the API server functionality as a library,
//! allowing it to be tested and reused (the integration-tests crate boots
//! the full router against in-memory stores).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
