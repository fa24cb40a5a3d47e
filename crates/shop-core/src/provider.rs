//! # Catalog Provider Trait
//!
//! The external boundary that supplies product records. The storefront only
//! depends on this trait; the HTTP implementation lives in `shop-catalog`.
//! A provider failure is always recoverable: callers fall back to the fixed
//! catalog, and the cart is never touched.

use crate::error::StoreResult;
use crate::product::Product;
use async_trait::async_trait;
use std::sync::Arc;

/// An external data provider returning an ordered list of product records
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the catalog. May fail (network/error); the Cart Store and
    /// Checkout Session must keep operating against whatever contents
    /// already exist.
    async fn fetch_catalog(&self) -> StoreResult<Vec<Product>>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed catalog provider (dynamic dispatch)
pub type BoxedCatalogProvider = Arc<dyn CatalogProvider>;
