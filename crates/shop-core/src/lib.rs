//! # shop-core
//!
//! Core types for the Flindor storefront's cart & checkout engine.
//!
//! This crate provides:
//! - `Cart` and `CartItem` — the Cart Store, the single source of truth for
//!   the shopper's selections
//! - `CheckoutSession`, `CheckoutStep`, `PaymentPhase` — the checkout state
//!   machine as a closed tagged-state set
//! - `DeliveryDetails`, `CardDetails` and the field validation / live
//!   formatting helpers
//! - `Product` and `ProductCatalog` — catalog record types
//! - `Notice`, `NavIntent`, `StoreEvent` — the notification and navigation
//!   boundaries toward the presentation layer
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use shop_core::{Cart, CartItem, Price, Product};
//!
//! let product = Product::new(26, "Cleaning", Price::new(35000), "Services");
//!
//! let mut cart = Cart::new();
//! cart.add_or_increment(CartItem::from_product(&product, None));
//! cart.add_or_increment(CartItem::from_product(&product, None));
//!
//! assert_eq!(cart.subtotal().amount, 70000);
//! assert_eq!(cart.subtotal().display(), "₦70,000");
//! ```

pub mod cart;
pub mod error;
pub mod event;
pub mod fields;
pub mod money;
pub mod product;
pub mod provider;
pub mod session;

// Re-exports for convenience
pub use cart::{Cart, CartItem};
pub use error::{StoreError, StoreResult};
pub use event::{NavIntent, Notice, StoreEvent};
pub use fields::{
    format_card_number, format_expiry, is_valid_card_number, is_valid_email,
    is_valid_expiry, is_valid_full_name, is_valid_phone, is_valid_postal_code, mask_card,
    sanitize_cvv, CardDetails, DeliveryDetails,
};
pub use money::Price;
pub use product::{Product, ProductCatalog};
pub use provider::{BoxedCatalogProvider, CatalogProvider};
pub use session::{CheckoutSession, CheckoutStep, PaymentPhase};
