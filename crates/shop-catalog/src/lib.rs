//! # shop-catalog
//!
//! Catalog provider integration for the Flindor storefront.
//!
//! This crate provides:
//! - `HttpCatalogProvider` — fetches and normalizes records from a
//!   DummyJSON-shaped product API
//! - `load_catalog` — provider fetch with unconditional fallback; a
//!   provider failure never corrupts or clears the cart
//! - `fallback_catalog` / `service_products` — the fixed product set from
//!   `config/products.toml` (or compiled in)
//!
//! The `CatalogProvider` trait itself lives in `shop-core`; the rest of the
//! engine only ever sees that boundary.

pub mod config;
pub mod fallback;
pub mod http;

pub use config::CatalogConfig;
pub use fallback::{fallback_catalog, load_catalog, service_products};
pub use http::{normalize, HttpCatalogProvider, ProviderProduct};
