//! Wishlist route handlers.
//!
//! Same storage and response shape as the cart. Wishlists hold at most one
//! of each product; quantities only become meaningful after a move to the
//! cart.

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

/// Add / remove / move request body.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: String,
}

/// Show the current wishlist.
#[instrument(skip(state, session, auth))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
) -> Result<Json<ListView>> {
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Wishlist).await?;
    let wishlist = ItemListRepository::new(state.pool()).load(&key).await?;
    Ok(Json(wishlist.into()))
}

/// Add a product to the wishlist.
#[instrument(skip(state, session, auth))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<WishlistForm>,
) -> Result<Response> {
    let item = lists::line_item_for(&state, &form.product_id).await?;

    let repo = ItemListRepository::new(state.pool());
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Wishlist).await?;
    let mut wishlist = repo.load(&key).await?;

    if wishlist.add(item) == AddOutcome::Added {
        repo.save(&key, &wishlist).await?;
    }

    Ok(lists::changed(wishlist.into()))
}

/// Remove a product from the wishlist.
#[instrument(skip(state, session, auth))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<WishlistForm>,
) -> Result<Response> {
    let repo = ItemListRepository::new(state.pool());
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Wishlist).await?;
    let mut wishlist = repo.load(&key).await?;

    if wishlist.remove(&ItemId::new(form.product_id)) {
        repo.save(&key, &wishlist).await?;
    }

    Ok(lists::changed(wishlist.into()))
}

/// Move a product from the wishlist to the cart.
///
/// The item leaves the wishlist only if the cart accepts it; a product
/// already in the cart stays on the wishlist.
#[instrument(skip(state, session, auth))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Json(form): Json<WishlistForm>,
) -> Result<Response> {
    let repo = ItemListRepository::new(state.pool());
    let wishlist_key =
        lists::resolve_key(&session, auth.0.as_ref(), ListKind::Wishlist).await?;
    let cart_key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Cart).await?;

    let mut wishlist = repo.load(&wishlist_key).await?;
    let mut cart = repo.load(&cart_key).await?;

    let id = ItemId::new(form.product_id);
    if !cart.contains(&id)
        && let Some(item) = wishlist.take(&id)
    {
        cart.add(item);
        repo.save(&cart_key, &cart).await?;
        repo.save(&wishlist_key, &wishlist).await?;
    }

    Ok(lists::changed(wishlist.into()))
}

/// Get the wishlist item count, for badges.
#[instrument(skip(state, session, auth))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
) -> Result<Json<CountView>> {
    let key = lists::resolve_key(&session, auth.0.as_ref(), ListKind::Wishlist).await?;
    let wishlist = ItemListRepository::new(state.pool()).load(&key).await?;
    Ok(Json(CountView {
        count: u32::try_from(wishlist.len()).unwrap_or(u32::MAX),
    }))
}
