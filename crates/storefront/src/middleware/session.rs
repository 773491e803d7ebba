//! Session middleware configuration.
//!
//! The session is the visitor's key-value store; the cart is kept in it
//! (see [`crate::cart_store`]). Sessions live in memory, so carts do not
//! survive a server restart.

use tower_sessions::{Expiry, SessionManagerLayer};

use crate::config::ShopConfig;
use crate::middleware::session_store::SessionCache;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shop_session";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Create the session layer over a bounded, expiring in-memory store.
#[must_use]
pub fn create_session_layer(config: &ShopConfig) -> SessionManagerLayer<SessionCache> {
    let expiry_seconds = i64::from(config.session_days) * SECONDS_PER_DAY;

    SessionManagerLayer::new(SessionCache::new(config.max_sessions))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(expiry_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
