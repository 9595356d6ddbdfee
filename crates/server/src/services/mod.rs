//! Business logic, kept out of the route handlers.

pub mod auth;
pub mod orders;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use orders::{OrderError, OrderService};
pub use token::{TokenError, TokenService};
