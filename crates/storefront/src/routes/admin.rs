//! Admin panel route handlers.
//!
//! Admin accounts can list every order and walk an order through the
//! fulfilment statuses. Status writes go straight to the commerce API, so
//! customers see the change on their next order-history load.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use gadget_grove_core::{OrderId, OrderStatus};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::routes::account::OrdersView;
use crate::state::AppState;

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// List all orders (admin only).
#[instrument(skip(state, _admin))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<OrdersView>> {
    let orders = state.catalog().list_orders().await?;
    Ok(Json(OrdersView { orders }))
}

/// Set an order's status (admin only).
///
/// Any status may be assigned from any other; the shop operator is
/// trusted to correct mistakes by moving backwards.
#[instrument(skip(state, admin))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Order>> {
    let id = OrderId::new(id);
    let order = state.catalog().set_order_status(&id, form.status).await?;

    tracing::info!(
        order_id = %id,
        status = %form.status,
        admin = %admin.email,
        "order status updated"
    );

    Ok(Json(order))
}

/// Admin panel summary counters.
#[instrument(skip(state, _admin))]
pub async fn summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Value>> {
    let orders = state.catalog().list_orders().await?;

    let pending = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();

    Ok(Json(json!({
        "total_orders": orders.len(),
        "pending_orders": pending,
    })))
}
