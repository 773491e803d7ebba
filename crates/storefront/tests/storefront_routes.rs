//! HTTP tests for the storefront router.
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`;
//! the session cookie from one response is replayed on the next request to
//! act as the same visitor.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::Path;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use corner_shop_storefront::{
    catalog::load_catalog, config::ShopConfig, middleware::session::SESSION_COOKIE_NAME,
    state::AppState,
};
use tower::ServiceExt;

fn test_app() -> Router {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = ShopConfig {
        catalog_path: root.join("data/products.json"),
        static_dir: root.join("static"),
        ..ShopConfig::default()
    };
    let catalog = load_catalog(&config.catalog_path).unwrap();
    corner_shop_storefront::app(AppState::new(config, catalog))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `name=value` pair of the session cookie set on a response.
fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(SESSION_COOKIE_NAME))
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn catalog_lists_every_product_by_default() {
    let response = test_app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Products (12)"));
    assert!(html.contains("Wireless Headphones"));
    assert!(html.contains("Desk Lamp"));
}

#[tokio::test]
async fn catalog_applies_query_filters() {
    let response = test_app()
        .oneshot(get("/?category=home&rating=4", None))
        .await
        .unwrap();
    let html = body_text(response).await;

    assert!(html.contains("French Press"));
    assert!(html.contains("Ceramic Mug Set"));
    assert!(!html.contains("Desk Lamp"));
    assert!(!html.contains("Smart Watch"));
    assert!(html.contains("Clear All"));
}

#[tokio::test]
async fn catalog_price_range_is_inclusive() {
    let response = test_app()
        .oneshot(get("/?min_price=19.99&max_price=24.50", None))
        .await
        .unwrap();
    let html = body_text(response).await;

    assert!(html.contains("Products (2)"));
    assert!(html.contains("Cotton T-Shirt"));
    assert!(html.contains("Sunglasses"));
}

#[tokio::test]
async fn catalog_with_no_matches_shows_empty_message() {
    let response = test_app()
        .oneshot(get("/?category=garden", None))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("No products match your filters"));
}

#[tokio::test]
async fn catalog_ignores_malformed_filters() {
    let response = test_app()
        .oneshot(get("/?min_price=cheap&rating=lots", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Products (12)"));
}

#[tokio::test]
async fn catalog_clamps_rating_above_five() {
    let response = test_app()
        .oneshot(get("/?rating=300", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No products match your filters"));
}

#[tokio::test]
async fn add_to_cart_persists_in_session() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", "product_id=11&return_to=%2F%3Fcategory%3Dhome", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?category=home");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", "product_id=11", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.oneshot(get("/cart", Some(&cookie))).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("French Press"));
    assert!(html.contains("$69.98"));
    assert!(html.contains("2 items"));
}

#[tokio::test]
async fn update_to_zero_removes_line() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", "product_id=4", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_form("/cart/update", "product_id=4&quantity=0", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");

    let response = app.oneshot(get("/cart", Some(&cookie))).await.unwrap();
    assert!(body_text(response).await.contains("Your cart is empty"));
}

#[tokio::test]
async fn remove_drops_line() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", "product_id=7", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);
    app.clone()
        .oneshot(post_form("/cart/add", "product_id=8", Some(&cookie)))
        .await
        .unwrap();

    app.clone()
        .oneshot(post_form("/cart/remove", "product_id=7", Some(&cookie)))
        .await
        .unwrap();

    let html = body_text(app.oneshot(get("/cart", Some(&cookie))).await.unwrap()).await;
    assert!(!html.contains("Leather Wallet"));
    assert!(html.contains("Sunglasses"));
    assert!(html.contains("1 item)"));
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let response = test_app()
        .oneshot(post_form("/cart/add", "product_id=999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirect_target_must_be_local() {
    let response = test_app()
        .oneshot(post_form(
            "/cart/add",
            "product_id=1&return_to=https%3A%2F%2Fevil.test%2F",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn product_page_renders_and_unknown_is_not_found() {
    let app = test_app();

    let response = app.clone().oneshot(get("/products/5", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Denim Jacket"));
    assert!(html.contains("Cotton T-Shirt"));

    let response = app.oneshot(get("/products/999", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_redirects_with_notice() {
    let app = test_app();

    let response = app.clone().oneshot(post_form("/checkout", "", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart?checkout=unavailable");

    let response = app
        .oneshot(get("/cart?checkout=unavailable", None))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("Checkout is not available yet"));
}

#[tokio::test]
async fn responses_carry_security_headers_and_request_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-request-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "test-request-1");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(
        headers["content-security-policy"]
            .to_str()
            .unwrap()
            .contains("script-src 'none'")
    );
}

#[tokio::test]
async fn static_stylesheet_is_served() {
    let response = test_app()
        .oneshot(get("/static/css/main.css", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
