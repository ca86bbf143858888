//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::saleor::SaleorClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the Saleor client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    saleor: SaleorClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let saleor = SaleorClient::new(&config.saleor);

        Self {
            inner: Arc::new(AppStateInner { config, saleor }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Saleor API client.
    #[must_use]
    pub fn saleor(&self) -> &SaleorClient {
        &self.inner.saleor
    }

    /// Prime the product cache in the background.
    pub fn start_cache_warming(&self) {
        let client = self.inner.saleor.clone();
        let channel = self.inner.config.default_channel.clone();
        let count = self.inner.config.saleor.prerender_count;

        tokio::spawn(async move {
            match client.warm_cache(&channel, count).await {
                Ok(warmed) => tracing::info!(warmed, channel = %channel, "Product cache warmed"),
                Err(e) => tracing::warn!(error = %e, channel = %channel, "Cache warming failed"),
            }
        });
    }
}
