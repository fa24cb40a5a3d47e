//! # Catalog Provider Configuration
//!
//! Connection settings for the upstream product API, loaded from the
//! environment. Everything has a working default; a missing variable is
//! never an error.

use std::env;
use std::time::Duration;

/// Default upstream product API
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// How many records to request from the upstream
pub const FETCH_LIMIT: u32 = 100;

/// How many goods the storefront actually lists
pub const CATALOG_LIMIT: usize = 35;

/// Catalog provider configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the product API (for testing/mocking)
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `CATALOG_BASE_URL` (default: `https://dummyjson.com`)
    /// - `CATALOG_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url =
            env::var("CATALOG_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Create config with an explicit base URL (for testing)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
