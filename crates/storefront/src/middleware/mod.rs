//! Middleware for the storefront.

pub mod auth;
pub mod session;

pub use auth::{OptionalAuth, RequireAdmin, RequireAuth};
pub use session::{create_session_layer, list_scope};
