//! Remote commerce API client and catalog assembly.
//!
//! Products and orders live behind a REST/JSON API; this storefront holds
//! no product rows of its own. The product list is cached with `moka`
//! (5-minute TTL) and merged with the bundled fixture lists, remote-first.
//! A failing remote never takes the catalog down: the merge layer falls
//! back to fixtures only.

pub mod fixtures;
pub mod merge;
pub mod types;

pub use fixtures::FixtureSet;
pub use merge::merge_catalog;
pub use types::{CreatedOrder, Product, ProductRecord};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use gadget_grove_core::{Email, OrderId, OrderStatus};

use crate::config::CommerceApiConfig;
use crate::models::Order;

/// Cache TTL for the remote product list.
const PRODUCTS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key for the product list (the only cached response).
const PRODUCTS_CACHE_KEY: &str = "products";

/// Errors that can occur when talking to the commerce API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Client for the remote commerce API.
///
/// Cheaply cloneable; all handlers share one connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    products_cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new commerce API client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let products_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(PRODUCTS_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                api_token: config.api_token.expose_secret().to_owned(),
                products_cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CatalogError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "commerce API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse commerce API response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Fetch the remote product list (cached for 5 minutes).
    ///
    /// Records without a usable identifier are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(cached) = self.inner.products_cache.get(PRODUCTS_CACHE_KEY).await {
            tracing::debug!("products served from cache");
            return Ok(cached.as_ref().clone());
        }

        let records: Vec<ProductRecord> = self.get_json("/products").await?;
        let total = records.len();
        let products: Vec<Product> = records
            .into_iter()
            .filter_map(ProductRecord::into_product)
            .collect();
        if products.len() < total {
            tracing::warn!(
                dropped = total - products.len(),
                "remote product records without an identifier were dropped"
            );
        }

        self.inner
            .products_cache
            .insert(PRODUCTS_CACHE_KEY, Arc::new(products.clone()))
            .await;

        Ok(products)
    }

    /// Submit an order snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn submit_order(&self, order: &Order) -> Result<CreatedOrder, CatalogError> {
        self.post_json("/orders", order).await
    }

    /// Order history for one customer email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn orders_for_email(&self, email: &Email) -> Result<Vec<Order>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.url("/orders"))
            .bearer_auth(&self.inner.api_token)
            .query(&[("email", email.as_str())])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// All orders (admin view).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_orders(&self) -> Result<Vec<Order>, CatalogError> {
        self.get_json("/orders").await
    }

    /// Set an order's status (admin action).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown order id, or
    /// another error if the request fails.
    pub async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, CatalogError> {
        let response = self
            .inner
            .client
            .patch(self.url(&format!("/orders/{id}/status")))
            .bearer_auth(&self.inner.api_token)
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .bearer_auth(&self.inner.api_token)
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }
}

/// The storefront catalog: remote products merged with bundled fixtures.
///
/// A remote failure is logged and swallowed; the caller always gets a
/// catalog, possibly fixtures-only.
pub async fn merged_products(client: &CatalogClient, fixtures: &FixtureSet) -> Vec<Product> {
    let remote = match client.list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("remote catalog unavailable, serving fixtures only: {e}");
            Vec::new()
        }
    };

    let lists = fixtures.lists();
    merge_catalog(remote, &lists)
}
