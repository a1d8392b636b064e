//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Products
//! GET  /products                   - Merged catalog listing
//! GET  /products/{id}              - Product detail
//!
//! # Cart
//! GET  /cart                       - Current cart
//! POST /cart/add                   - Add product (idempotent on duplicates)
//! POST /cart/adjust                - Step a line quantity (floor 1)
//! POST /cart/remove                - Remove product
//! GET  /cart/count                 - Cart count badge
//!
//! # Wishlist
//! GET  /wishlist                   - Current wishlist
//! POST /wishlist/add               - Add product
//! POST /wishlist/remove            - Remove product
//! POST /wishlist/move-to-cart      - Move product into the cart
//! GET  /wishlist/count             - Wishlist count badge
//!
//! # Checkout
//! POST /checkout                   - Place an order from the cart
//!
//! # Auth
//! POST /auth/register              - Create account and sign in
//! POST /auth/login                 - Sign in
//! POST /auth/logout                - Sign out
//! GET  /auth/me                    - Current identity
//!
//! # Account (requires auth)
//! GET  /account                    - Account overview
//! GET  /account/orders             - Order history
//!
//! # Admin (requires admin role)
//! GET  /admin/orders               - All orders
//! POST /admin/orders/{id}/status   - Update an order's status
//! GET  /admin/summary              - Order counters
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod lists;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/adjust", post(cart::adjust))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/move-to-cart", post(wishlist::move_to_cart))
        .route("/count", get(wishlist::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::orders))
        .route("/orders/{id}/status", post(admin::set_status))
        .route("/summary", get(admin::summary))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", post(checkout::place_order))
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .nest("/admin", admin_routes())
}
