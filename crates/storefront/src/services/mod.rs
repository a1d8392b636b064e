//! Business logic services for the storefront.

pub mod auth;
pub mod checkout;
pub mod notify;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutService};
pub use notify::OrderNotifier;
