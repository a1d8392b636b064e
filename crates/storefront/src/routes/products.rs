//! Product catalog route handlers.
//!
//! The catalog is the remote product list merged with the bundled fixture
//! lists, remote entries first. A failing remote degrades to fixtures
//! rather than an error page.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::catalog::{Product, merged_products};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// JSON view of the full catalog.
#[derive(Serialize)]
pub struct CatalogView {
    pub products: Vec<Product>,
}

/// List the merged catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<CatalogView> {
    let products = merged_products(state.catalog(), state.fixtures()).await;
    Json(CatalogView { products })
}

/// Show one product by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let products = merged_products(state.catalog(), state.fixtures()).await;

    products
        .into_iter()
        .find(|p| p.id.as_str() == id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
