//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `SHOP_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: `http://localhost:3000`)
//! - `SHOP_CATALOG_PATH` - Product catalog JSON file
//!   (default: `crates/storefront/data/products.json`)
//! - `SHOP_STATIC_DIR` - Static asset directory (default: `crates/storefront/static`)
//! - `SHOP_SESSION_DAYS` - Days of inactivity before a visitor's cart is forgotten (default: 7)
//! - `SHOP_MAX_SESSIONS` - Sessions held in memory before the least used are evicted
//!   (default: 100000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Product catalog JSON file
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Session inactivity expiry in days
    pub session_days: u16,
    /// Upper bound on sessions held in memory
    pub max_sessions: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog_path: PathBuf::from("crates/storefront/data/products.json"),
            static_dir: PathBuf::from("crates/storefront/static"),
            session_days: 7,
            max_sessions: 100_000,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sentry_sample_rate = parse_or(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?;
        let sentry_traces_sample_rate = parse_or(
            &lookup,
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
        )?;
        validate_rate("SENTRY_SAMPLE_RATE", sentry_sample_rate)?;
        validate_rate("SENTRY_TRACES_SAMPLE_RATE", sentry_traces_sample_rate)?;

        Ok(Self {
            host: parse_or(&lookup, "SHOP_HOST", defaults.host)?,
            port: parse_or(&lookup, "SHOP_PORT", defaults.port)?,
            base_url: lookup("SHOP_BASE_URL").unwrap_or(defaults.base_url),
            catalog_path: lookup("SHOP_CATALOG_PATH").map_or(defaults.catalog_path, PathBuf::from),
            static_dir: lookup("SHOP_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            session_days: parse_or(&lookup, "SHOP_SESSION_DAYS", defaults.session_days)?,
            max_sessions: parse_or(&lookup, "SHOP_MAX_SESSIONS", defaults.max_sessions)?,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Sample rates must lie in `0.0..=1.0`.
fn validate_rate(key: &str, rate: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
