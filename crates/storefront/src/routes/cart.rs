//! Cart route handlers.
//!
//! The cart lives server-side, keyed by the signed-in email or a guest
//! session id. Every mutation responds with the updated list and the
//! change-broadcast header.

use axum::{Json, extract::State, response::Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gadget_grove_core::ItemId;

use crate::db::item_lists::ItemListRepository;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::{AddOutcome, ListKind};
use crate::routes::lists::{self, CountView, ListView};
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: String,
}

/// Quantity adjustment request body.
#[derive(Debug, Deserialize)]
pub struct AdjustForm {
    pub product_id: String,
    /// Signed step; the stored quantity never drops below 1.
    pub delta: i32,
}

/// Remove request body.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_id: String,
}

/// Show the current cart.
#[instrument(skip(state, session, auth))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
) -> Result<Json<ListView>> {
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Cart).await?;
    let cart = ItemListRepository::new(state.pool()).load(&key).await?;
    Ok(Json(cart.into()))
}

/// Add a product to the cart.
///
/// Re-adding a product that is already present resets nothing and reports
/// the unchanged list.
#[instrument(skip(state, session, auth))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<AddForm>,
) -> Result<Response> {
    let item = lists::line_item_for(&state, &form.product_id).await?;

    let repo = ItemListRepository::new(state.pool());
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Cart).await?;
    let mut cart = repo.load(&key).await?;

    if cart.add(item) == AddOutcome::Added {
        repo.save(&key, &cart).await?;
    }

    Ok(lists::changed(cart.into()))
}

/// Adjust a cart line's quantity by a signed step.
#[instrument(skip(state, session, auth))]
pub async fn adjust(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<AdjustForm>,
) -> Result<Response> {
    let repo = ItemListRepository::new(state.pool());
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Cart).await?;
    let mut cart = repo.load(&key).await?;

    if cart.adjust_quantity(&ItemId::new(form.product_id), form.delta) {
        repo.save(&key, &cart).await?;
    }

    Ok(lists::changed(cart.into()))
}

/// Remove a product from the cart.
#[instrument(skip(state, session, auth))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<RemoveForm>,
) -> Result<Response> {
    let repo = ItemListRepository::new(state.pool());
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Cart).await?;
    let mut cart = repo.load(&key).await?;

    if cart.remove(&ItemId::new(form.product_id)) {
        repo.save(&key, &cart).await?;
    }

    Ok(lists::changed(cart.into()))
}

/// Get the cart item count, for badges.
#[instrument(skip(state, session, auth))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
) -> Result<Json<CountView>> {
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Cart).await?;
    let cart = ItemListRepository::new(state.pool()).load(&key).await?;
    Ok(Json(CountView {
        count: cart.total_quantity(),
    }))
}
