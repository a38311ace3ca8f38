//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    shopify: AdminClient,
}

impl AppState {
    /// Build state with an Admin API client for the configured store.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        Self::with_shopify(config, pool, shopify)
    }

    /// Build state around an existing client.
    #[must_use]
    pub fn with_shopify(config: AdminConfig, pool: PgPool, shopify: AdminClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                shopify,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }
}
