//! Account route handlers.
//!
//! Signed-in customers see their own order history, filtered by the
//! commerce API on their account email.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Order};
use crate::state::AppState;

/// JSON view of an account overview.
#[derive(Serialize)]
pub struct AccountView {
    pub user: CurrentUser,
}

/// JSON view of an order history.
#[derive(Serialize)]
pub struct OrdersView {
    pub orders: Vec<Order>,
}

/// Account overview.
#[instrument(skip(user))]
pub async fn index(RequireAuth(user): RequireAuth) -> Json<AccountView> {
    Json(AccountView { user })
}

/// Order history for the signed-in account.
#[instrument(skip(state, user))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<OrdersView>> {
    let orders = state.catalog().orders_for_email(&user.email).await?;
    Ok(Json(OrdersView { orders }))
}
