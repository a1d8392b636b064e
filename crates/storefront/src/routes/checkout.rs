//! Checkout route handler.

use axum::{
    Json,
    extract::State,
    http::HeaderName,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use gadget_grove_core::OrderId;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::routes::lists;
use crate::services::{CheckoutRequest, CheckoutService};
use crate::state::AppState;

/// JSON view of a placed order.
#[derive(Serialize)]
pub struct PlacedOrderView {
    pub order_id: OrderId,
}

/// Place an order from the current cart.
///
/// Validation failures and an empty cart come back as 400s with the cart
/// untouched; only a successful submission clears it. The response carries
/// the change-broadcast header so count badges reset.
#[instrument(skip(state, session, auth, form))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<CheckoutRequest>,
) -> Result<Response> {
    let scope = lists::resolve_scope(&session, &auth).await?;

    let service = CheckoutService::new(state.pool(), state.catalog(), state.notifier());
    let created = service.place_order(&scope, &form).await?;

    tracing::info!(order_id = %created.id, "checkout complete");

    Ok((
        AppendHeaders([(HeaderName::from_static("hx-trigger"), "cart-updated")]),
        Json(PlacedOrderView {
            order_id: created.id,
        }),
    )
        .into_response())
}
