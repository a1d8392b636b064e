//! Shared plumbing for the cart and wishlist routes.
//!
//! Both lists are stored and mutated the same way; only the kind differs.
//! Mutating responses carry an `HX-Trigger: cart-updated` header so count
//! badges and mini-cart views know to refresh.

use axum::{
    Json,
    http::HeaderName,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;

use gadget_grove_core::Money;

use crate::catalog::Product;
use crate::error::AppError;
use crate::middleware::{OptionalAuth, list_scope};
use crate::models::{CurrentUser, ItemList, LineItem, ListKind, ListScope};
use crate::state::AppState;

/// Event name broadcast after any list mutation.
const LIST_CHANGED_EVENT: &str = "cart-updated";

/// JSON view of an item list.
#[derive(Serialize)]
pub struct ListView {
    pub items: ItemList,
    pub total_quantity: u32,
    pub subtotal: Money,
}

impl From<ItemList> for ListView {
    fn from(items: ItemList) -> Self {
        let total_quantity = items.total_quantity();
        let subtotal = items.subtotal();
        Self {
            items,
            total_quantity,
            subtotal,
        }
    }
}

/// JSON view of a list's size, for count badges.
#[derive(Serialize)]
pub struct CountView {
    pub count: u32,
}

/// Wrap a list response with the change-broadcast header.
pub fn changed(view: ListView) -> Response {
    (
        AppendHeaders([(HeaderName::from_static("hx-trigger"), LIST_CHANGED_EVENT)]),
        Json(view),
    )
        .into_response()
}

/// Resolve the storage key for this request's list.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn resolve_key(
    session: &Session,
    user: Option<&CurrentUser>,
    kind: ListKind,
) -> Result<String, AppError> {
    let scope = list_scope(session, user)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(scope.storage_key(kind))
}

/// Resolve the full list scope (used by checkout, which needs the scope
/// itself rather than a single key).
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn resolve_scope(
    session: &Session,
    OptionalAuth(user): &OptionalAuth,
) -> Result<ListScope, AppError> {
    list_scope(session, user.as_ref())
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}

/// Find a product in the merged catalog and turn it into a line item.
///
/// Item lists only ever hold products the catalog knows about; prices come
/// from the catalog, never from the client.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product id and
/// `AppError::BadRequest` for one that is out of stock.
pub async fn line_item_for(state: &AppState, product_id: &str) -> Result<LineItem, AppError> {
    let products =
        crate::catalog::merged_products(state.catalog(), state.fixtures()).await;

    let product = products
        .into_iter()
        .find(|p| p.id.as_str() == product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    if !product.in_stock {
        return Err(AppError::BadRequest(format!(
            "product {product_id} is out of stock"
        )));
    }

    Ok(line_item_from(product))
}

fn line_item_from(product: Product) -> LineItem {
    LineItem {
        id: product.id,
        title: product.title,
        price: product.price,
        quantity: 1,
        image: product.image,
    }
}
