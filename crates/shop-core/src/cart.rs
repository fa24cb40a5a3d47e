//! # Cart Store
//!
//! The single source of truth for the shopper's current selections.
//! Holds at most one line per product id, preserves insertion order, and is
//! mutated only through the four operations below. The subtotal is derived
//! on every read, never cached.

use crate::money::Price;
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// A line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID (unique within the cart)
    pub product_id: u64,

    /// Product title (denormalized for display)
    pub title: String,

    /// Unit price in the smallest currency unit
    #[serde(default)]
    pub unit_price: Price,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Brand name
    #[serde(default)]
    pub brand: String,

    /// Storefront category
    #[serde(default)]
    pub category: String,

    /// Quantity in cart (≥ 1 while the item is present)
    pub quantity: u32,

    /// Selected size variant, if the shopper picked one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartItem {
    /// Build a cart line from a catalog product, quantity 1
    pub fn from_product(product: &Product, size: Option<String>) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            quantity: 1,
            size: size.or_else(|| product.sizes.first().cloned()),
        }
    }

    /// Line total: unit price × quantity
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered collection of cart lines, owned by the store for the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart (session start)
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a new line or increment an existing one.
    ///
    /// If a line with the same product id exists, its quantity goes up by one
    /// and, when the incoming item carries a size, the stored size is
    /// replaced (most recent selection wins). Otherwise the item is appended
    /// with quantity 1. Always succeeds.
    pub fn add_or_increment(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity += 1;
                if item.size.is_some() {
                    existing.size = item.size;
                }
            }
            None => {
                self.items.push(CartItem {
                    quantity: 1,
                    ..item
                });
            }
        }
    }

    /// Decrement a line by one; remove it when it reaches zero.
    ///
    /// No-op if the product is absent. Removal on the last unit is
    /// deliberate product behavior, not a clamp.
    pub fn decrement(&mut self, product_id: u64) {
        if let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) {
            if self.items[pos].quantity > 1 {
                self.items[pos].quantity -= 1;
            } else {
                self.items.remove(pos);
            }
        }
    }

    /// Delete a line regardless of quantity. No-op if absent.
    pub fn remove(&mut self, product_id: u64) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empty the cart unconditionally
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Derived subtotal: Σ unit price × quantity. Zero for an empty cart,
    /// never negative.
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, item| acc.plus(item.line_total()))
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: u64, price: i64) -> CartItem {
        CartItem {
            product_id,
            title: format!("Product {}", product_id),
            unit_price: Price::new(price),
            image: String::new(),
            brand: "Flindor".into(),
            category: "Services".into(),
            quantity: 1,
            size: None,
        }
    }

    #[test]
    fn test_add_then_increment() {
        let mut cart = Cart::new();
        cart.add_or_increment(item(1, 35000));
        cart.add_or_increment(item(1, 35000));
        cart.add_or_increment(item(2, 18000));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_no_duplicate_product_ids() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add_or_increment(item(7, 1000));
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_size_replacement_most_recent_wins() {
        let mut cart = Cart::new();
        let mut first = item(1, 5000);
        first.size = Some("M".into());
        cart.add_or_increment(first);

        let mut second = item(1, 5000);
        second.size = Some("XL".into());
        cart.add_or_increment(second);

        assert_eq!(cart.items()[0].size.as_deref(), Some("XL"));

        // No size on the incoming item keeps the stored one.
        cart.add_or_increment(item(1, 5000));
        assert_eq!(cart.items()[0].size.as_deref(), Some("XL"));
    }

    #[test]
    fn test_decrement_removes_on_last_unit() {
        let mut cart = Cart::new();
        cart.add_or_increment(item(1, 5000));
        cart.add_or_increment(item(1, 5000));

        cart.decrement(1);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.decrement(1);
        assert!(cart.is_empty());

        // Absent product: no-op, no panic.
        cart.decrement(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_decrement_round_trip() {
        let mut cart = Cart::new();
        cart.add_or_increment(item(1, 5000));
        cart.add_or_increment(item(2, 9000));
        let before = cart.clone();

        cart.add_or_increment(item(2, 9000));
        cart.decrement(2);

        assert_eq!(cart.items(), before.items());
        assert_eq!(cart.subtotal(), before.subtotal());
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = Cart::new();
        for _ in 0..4 {
            cart.add_or_increment(item(3, 2000));
        }
        cart.remove(3);
        assert!(cart.is_empty());

        cart.remove(3); // absent: no-op
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Price::ZERO);

        cart.add_or_increment(item(1, 35000));
        cart.add_or_increment(item(1, 35000));
        cart.add_or_increment(item(2, 18000));

        assert_eq!(cart.subtotal().amount, 35000 * 2 + 18000);

        cart.clear();
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let mut cart = Cart::new();
        let line: CartItem = serde_json::from_str(
            r#"{"product_id": 1, "title": "Mystery", "quantity": 3}"#,
        )
        .unwrap();
        cart.add_or_increment(line);
        cart.add_or_increment(item(2, 1000));

        assert_eq!(cart.subtotal().amount, 1000);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_or_increment(item(5, 100));
        cart.add_or_increment(item(3, 100));
        cart.add_or_increment(item(9, 100));
        cart.add_or_increment(item(3, 100)); // increment must not reorder

        let ids: Vec<u64> = cart.items().iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }
}
