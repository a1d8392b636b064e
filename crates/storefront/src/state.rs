//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::{CatalogClient, FixtureSet};
use crate::config::StorefrontConfig;
use crate::services::OrderNotifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: CatalogClient,
    fixtures: FixtureSet,
    notifier: OrderNotifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog fixtures fail to parse.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, serde_json::Error> {
        let catalog = CatalogClient::new(&config.commerce);
        let fixtures = FixtureSet::load()?;
        let notifier = OrderNotifier::new(reqwest::Client::new(), config.order_webhook_url.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                fixtures,
                notifier,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the commerce API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the bundled catalog fixtures.
    #[must_use]
    pub fn fixtures(&self) -> &FixtureSet {
        &self.inner.fixtures
    }

    /// Get a clone of the order notifier.
    #[must_use]
    pub fn notifier(&self) -> OrderNotifier {
        self.inner.notifier.clone()
    }
}
