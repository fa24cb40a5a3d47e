//! # Product Types
//!
//! Product catalog types for the storefront. Records come from the external
//! catalog provider (see `shop-catalog`) or the fixed fallback list in
//! `config/products.toml`. Missing price or stock deserializes to zero so a
//! half-formed provider record can never poison a derived total.

use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A product record in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: u64,

    /// Display title
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Unit price in the smallest currency unit
    #[serde(default)]
    pub price: Price,

    /// Pre-discount price, if the product is discounted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Price>,

    /// Discount percentage, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,

    /// Average rating (0.0–5.0)
    #[serde(default)]
    pub rating: f64,

    /// Brand name
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Storefront category (e.g. "Household", "Decor", "Services")
    pub category: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Units in stock (zero for services)
    #[serde(default)]
    pub stock: u32,

    /// Available size variants, if the product has them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
}

fn default_brand() -> String {
    "Generic".to_string()
}

impl Product {
    /// Create a minimal product record
    pub fn new(id: u64, title: impl Into<String>, price: Price, category: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            old_price: None,
            discount: None,
            rating: 0.0,
            brand: default_brand(),
            category: category.into(),
            image: String::new(),
            stock: 0,
            sizes: Vec::new(),
        }
    }

    /// Builder: set brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Builder: set image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Builder: set size variants
    pub fn with_sizes(mut self, sizes: Vec<String>) -> Self {
        self.sizes = sizes;
        self
    }
}

/// Ordered product catalog, as returned by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Find a product by ID
    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Load catalog from a TOML string (fallback file format)
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = ProductCatalog::new();
        catalog.add(Product::new(26, "Cleaning", Price::new(35000), "Services"));
        catalog.add(Product::new(27, "TV Installation", Price::new(18000), "Services"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(26).map(|p| p.title.as_str()), Some("Cleaning"));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let product: Product = serde_json::from_str(
            r#"{"id": 1, "title": "Mystery Box", "category": "Household"}"#,
        )
        .unwrap();

        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.brand, "Generic");
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_builder() {
        let product = Product::new(5, "Rug", Price::new(12000), "Decor")
            .with_brand("Flindor")
            .with_sizes(vec!["S".into(), "M".into()]);

        assert_eq!(product.brand, "Flindor");
        assert_eq!(product.sizes.len(), 2);
    }
}
