//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog with filters (?category, min_price, max_price, rating, view)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//!
//! # Cart (form posts, 303 back to `return_to`)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit
//! POST /cart/update            - Set quantity (below one removes)
//! POST /cart/remove            - Remove line
//!
//! # Checkout
//! POST /checkout               - Not offered; redirects to /cart with a notice
//! ```

pub mod cart;
pub mod home;
pub mod products;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::index))
        .route("/health", get(health))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(cart::checkout))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}
