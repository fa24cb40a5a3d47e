//! # HTTP Catalog Provider
//!
//! Fetches product records from a DummyJSON-shaped product API and
//! normalizes them into the storefront's catalog shape: prices converted to
//! ₦, upstream categories mapped onto the Household/Decor taxonomy, and
//! half-formed records defaulted rather than rejected.

use crate::config::{CatalogConfig, CATALOG_LIMIT, FETCH_LIMIT};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{CatalogProvider, Price, Product, StoreError, StoreResult};
use tracing::{debug, instrument};

/// Approximate conversion rate used for display pricing
const NAIRA_PER_USD: f64 = 1500.0;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x500";

/// Raw record as the upstream returns it. Optional everywhere: a missing
/// price or stock becomes zero downstream, never an error.
#[derive(Debug, Deserialize)]
pub struct ProviderProduct {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, rename = "discountPercentage")]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    products: Vec<ProviderProduct>,
}

/// Map an upstream category onto the storefront taxonomy. Unmapped
/// categories are excluded from the catalog.
fn map_category(upstream: &str) -> Option<&'static str> {
    match upstream {
        "smartphones" | "laptops" | "tablets" | "mobile-accessories" | "automotive"
        | "motorcycle" | "sunglasses" | "kitchen-accessories" => Some("Household"),
        "furniture" | "home-decoration" | "lighting" | "womens-bags" | "womens-jewellery"
        | "fragrances" => Some("Decor"),
        _ => None,
    }
}

/// Kitchen accessories are only listed when they are electronics; cutlery
/// and crockery are excluded.
fn is_kitchen_electronic(title: &str) -> bool {
    let title = title.to_lowercase();

    const EXCLUDED: &[&str] = &[
        "fork", "spoon", "spatula", "knife", "knives", "plate", "bowl", "cup", "mug", "dish",
        "tray", "cutlery", "utensil",
    ];
    if EXCLUDED.iter().any(|k| title.contains(k)) {
        return false;
    }

    const ELECTRONIC: &[&str] = &[
        "blender",
        "microwave",
        "stove",
        "oven",
        "toaster",
        "coffee maker",
        "coffee machine",
        "mixer",
        "food processor",
        "electric",
        "appliance",
    ];
    ELECTRONIC.iter().any(|k| title.contains(k))
}

fn to_naira(usd: f64) -> i64 {
    (usd * NAIRA_PER_USD).round() as i64
}

/// Normalize one upstream record; `None` when its category is not carried
pub fn normalize(record: ProviderProduct) -> Option<Product> {
    let category = map_category(&record.category)?;
    if record.category == "kitchen-accessories" && !is_kitchen_electronic(&record.title) {
        return None;
    }

    let price = Price::new(record.price.map(to_naira).unwrap_or(0));
    // A full (or larger) discount would back-compute a nonsense old price.
    let discount = record
        .discount_percentage
        .map(|d| d.round() as u32)
        .filter(|&d| d > 0 && d < 100);
    let old_price = discount.map(|d| {
        Price::new((price.amount as f64 / (1.0 - f64::from(d) / 100.0)).round() as i64)
    });

    let image = record
        .thumbnail
        .filter(|t| !t.is_empty())
        .or_else(|| record.images.into_iter().next())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    Some(Product {
        id: record.id,
        title: record.title,
        description: record.description,
        price,
        old_price,
        discount,
        rating: (record.rating * 10.0).round() / 10.0,
        brand: record.brand.filter(|b| !b.is_empty()).unwrap_or_else(|| "Generic".to_string()),
        category: category.to_string(),
        image,
        stock: record.stock.unwrap_or(0),
        sizes: Vec::new(),
    })
}

/// Catalog provider backed by the upstream product API
pub struct HttpCatalogProvider {
    config: CatalogConfig,
    client: Client,
}

impl HttpCatalogProvider {
    /// Create a provider from explicit configuration
    pub fn new(config: CatalogConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::CatalogUnavailable(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> StoreResult<Self> {
        Self::new(CatalogConfig::from_env())
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch_catalog(&self) -> StoreResult<Vec<Product>> {
        let url = format!(
            "{}/products?limit={}&skip=0",
            self.config.base_url, FETCH_LIMIT
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::CatalogUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::CatalogUnavailable(format!(
                "upstream returned {}",
                response.status()
            )));
        }

        let body: ProviderResponse = response
            .json()
            .await
            .map_err(|e| StoreError::CatalogUnavailable(e.to_string()))?;

        let goods: Vec<Product> = body
            .products
            .into_iter()
            .filter_map(normalize)
            .take(CATALOG_LIMIT)
            .collect();

        debug!(count = goods.len(), "normalized upstream catalog");
        Ok(goods)
    }

    fn provider_name(&self) -> &'static str {
        "dummyjson"
    }
}
