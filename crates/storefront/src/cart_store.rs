//! Per-visitor cart persistence.
//!
//! The visitor's session is a small key-value store. The cart lives under
//! [`CART_KEY`] as a JSON string and is written back after every change.
//! Reading is best-effort: a missing, unreadable or malformed entry yields
//! an empty cart and a warning in the log, never an error page. Lines for
//! products no longer in the catalog are dropped on load.

use corner_shop_core::{Cart, Catalog};
use thiserror::Error;
use tower_sessions::Session;

/// Session key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Error persisting the cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write session: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Rehydrate the visitor's cart against the current catalog.
pub async fn load_cart(session: &Session, catalog: &Catalog) -> Cart {
    let mut cart = read_cart(session).await;
    let dropped = cart.retain_known(catalog);
    if dropped > 0 {
        tracing::info!(dropped, "Dropped cart lines for products no longer offered");
    }
    cart
}

async fn read_cart(session: &Session) -> Cart {
    let stored = match session.get::<String>(CART_KEY).await {
        Ok(Some(json)) => json,
        Ok(None) => return Cart::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cart from session");
            return Cart::new();
        }
    };

    parse_stored_cart(&stored)
}

/// Parse a stored cart, falling back to an empty one.
pub fn parse_stored_cart(json: &str) -> Cart {
    Cart::from_json(json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring malformed stored cart");
        Cart::new()
    })
}

/// Persist the visitor's cart.
///
/// # Errors
///
/// Returns [`CartStoreError`] if the session cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), CartStoreError> {
    let json = cart.to_json()?;
    session.insert(CART_KEY, json).await?;
    tracing::debug!(lines = cart.len(), items = cart.item_count(), "Cart saved");
    Ok(())
}
