//! Application state shared across handlers.

use std::sync::Arc;

use corner_shop_core::{Cart, Catalog, Filters, ShopState};

use crate::config::ShopConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the catalog loaded at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    catalog: Arc<Catalog>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ShopConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Arc::new(catalog),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Start a shop state for one request from the visitor's cart.
    #[must_use]
    pub fn shop(&self, cart: Cart) -> ShopState {
        ShopState {
            catalog: Arc::clone(&self.inner.catalog),
            cart,
            filters: Filters::default(),
        }
    }
}
