//! # Fallback Catalog
//!
//! The fixed product set the storefront falls back to when the upstream
//! provider is unavailable, plus the Flindor service offerings that never
//! come from the upstream at all. Loaded from `config/products.toml` when
//! present, with a compiled-in copy otherwise. A provider failure must not
//! corrupt or clear the cart, so the fallback path only ever swaps the
//! catalog.

use shop_core::{BoxedCatalogProvider, Price, Product, ProductCatalog};
use tracing::{info, warn};

/// Candidate locations for the fallback catalog file, relative to wherever
/// the binary runs from
const CONFIG_PATHS: &[&str] = &[
    "config/products.toml",
    "../config/products.toml",
    "../../config/products.toml",
];

/// The Flindor service offerings (installation, servicing, assembly).
/// Always appended to the catalog; the upstream only supplies goods.
pub fn service_products() -> Vec<Product> {
    let service = |id: u64, title: &str, description: &str, price: i64, old: i64, rating: f64, image: &str| {
        let mut p = Product::new(id, title, Price::new(price), "Services")
            .with_brand("Flindor")
            .with_image(image);
        p.description = description.to_string();
        p.old_price = Some(Price::new(old));
        p.rating = rating;
        p
    };

    vec![
        service(
            26,
            "Cleaning",
            "Comprehensive cleaning service for your home including dusting, mopping, and sanitization.",
            35000,
            45000,
            4.5,
            "https://images.unsplash.com/photo-1581578731548-c64695cc6952?w=400&h=500&fit=crop",
        ),
        service(
            27,
            "TV Installation",
            "Professional TV installation service with proper cable management and leveling.",
            18000,
            22000,
            4.1,
            "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?w=400&h=500&fit=crop",
        ),
        service(
            28,
            "AC Servicing",
            "Complete AC maintenance service including cleaning, gas refill, and performance check.",
            28000,
            35000,
            4.4,
            "https://images.unsplash.com/photo-1621905251918-48416bd8575a?w=400&h=500&fit=crop",
        ),
        service(
            29,
            "Furniture Assembling",
            "Expert furniture assembly service for all types of furniture including flat-pack items.",
            30000,
            38000,
            4.4,
            "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400&h=500&fit=crop",
        ),
        service(
            30,
            "Gas Cooker Set Up",
            "Complete gas cooker installation with safety inspection and leak testing.",
            24000,
            30000,
            4.2,
            "https://images.unsplash.com/photo-1556911220-bff31c812dba?w=400&h=500&fit=crop",
        ),
        service(
            31,
            "Plumbing Fix (Minor)",
            "Quick fix for minor plumbing issues including leak repairs and pipe maintenance.",
            20000,
            25000,
            4.2,
            "https://images.unsplash.com/photo-1621905251189-08b45d6a269e?w=400&h=500&fit=crop",
        ),
    ]
}

/// Load the fallback catalog from `config/products.toml`, falling back to
/// the compiled-in service list when no file is found or it fails to parse.
pub fn fallback_catalog() -> ProductCatalog {
    for path in CONFIG_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            match ProductCatalog::from_toml(&content) {
                Ok(catalog) => {
                    info!(count = catalog.len(), path, "loaded fallback catalog");
                    return catalog;
                }
                Err(err) => {
                    warn!(path, %err, "fallback catalog file unreadable, using built-in");
                }
            }
        }
    }

    ProductCatalog {
        products: service_products(),
    }
}

/// Fetch the catalog from the provider and append the service offerings.
/// On any provider failure, log a warning and serve the fallback instead;
/// catalog failure never touches cart or checkout state.
pub async fn load_catalog(provider: &BoxedCatalogProvider) -> ProductCatalog {
    match provider.fetch_catalog().await {
        Ok(goods) => {
            info!(
                provider = provider.provider_name(),
                count = goods.len(),
                "catalog fetched"
            );
            let mut catalog = ProductCatalog { products: goods };
            for service in service_products() {
                catalog.add(service);
            }
            catalog
        }
        Err(err) => {
            warn!(
                provider = provider.provider_name(),
                %err,
                "catalog fetch failed, serving fallback"
            );
            fallback_catalog()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shop_core::{CatalogProvider, StoreError, StoreResult};
    use std::sync::Arc;

    struct FailingProvider;

    #[async_trait]
    impl CatalogProvider for FailingProvider {
        async fn fetch_catalog(&self) -> StoreResult<Vec<Product>> {
            Err(StoreError::CatalogUnavailable("connection refused".into()))
        }

        fn provider_name(&self) -> &'static str {
            "failing"
        }
    }

    struct GoodsProvider;

    #[async_trait]
    impl CatalogProvider for GoodsProvider {
        async fn fetch_catalog(&self) -> StoreResult<Vec<Product>> {
            Ok(vec![Product::new(1, "Phone", Price::new(15000), "Household")])
        }

        fn provider_name(&self) -> &'static str {
            "goods"
        }
    }

    #[test]
    fn test_builtin_services() {
        let services = service_products();
        assert_eq!(services.len(), 6);
        assert!(services.iter().all(|p| p.category == "Services"));
        assert!(services.iter().all(|p| p.brand == "Flindor"));
        assert_eq!(services[0].price.amount, 35000);
    }

    #[tokio::test]
    async fn test_load_catalog_appends_services() {
        let provider: BoxedCatalogProvider = Arc::new(GoodsProvider);
        let catalog = load_catalog(&provider).await;

        assert_eq!(catalog.len(), 7);
        assert!(catalog.get(1).is_some());
        assert!(catalog.get(26).is_some());
    }

    #[tokio::test]
    async fn test_load_catalog_falls_back_on_error() {
        let provider: BoxedCatalogProvider = Arc::new(FailingProvider);
        let catalog = load_catalog(&provider).await;

        // At minimum the built-in services are served.
        assert!(!catalog.is_empty());
        assert!(catalog.get(26).is_some());
    }
}
