//! # Application State
//!
//! Shared state for the Axum application: the product catalog loaded at
//! startup, the shopper session registry, and server configuration.

use crate::sessions::SessionRegistry;
use shop_catalog::{load_catalog, HttpCatalogProvider};
use shop_core::{BoxedCatalogProvider, ProductCatalog};
use std::sync::Arc;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product catalog, fetched once at startup (fallback on provider failure)
    pub catalog: Arc<ProductCatalog>,
    /// Shopper session registry
    pub sessions: SessionRegistry,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the state for the server: fetch the catalog from the upstream
    /// provider, falling back to the fixed product set when it is down.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let provider: BoxedCatalogProvider = Arc::new(HttpCatalogProvider::from_env()?);
        let catalog = load_catalog(&provider).await;
        info!(count = catalog.len(), "catalog ready");

        Ok(Self {
            catalog: Arc::new(catalog),
            sessions: SessionRegistry::new(),
            config,
        })
    }

    /// Build state around a known catalog (tests, offline runs)
    pub fn with_catalog(catalog: ProductCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            sessions: SessionRegistry::new(),
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}
