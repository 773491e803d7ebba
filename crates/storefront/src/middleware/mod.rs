//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (record on the span, echo in the response)
//! 4. Security headers (CSP, frame denial, etc.)
//! 5. Session layer (tower-sessions over a bounded `moka` store)

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod session_store;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
