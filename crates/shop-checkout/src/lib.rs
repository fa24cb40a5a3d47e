//! # shop-checkout
//!
//! The checkout engine for the Flindor storefront.
//!
//! This crate provides:
//! - `CheckoutController` — owns one shopper's checkout flow: entry guard,
//!   field input, step transitions, and the simulated payment
//! - `start_authorization` / `AuthorizationGuard` — the fixed six-second
//!   authorization as cancelable tokio tasks, abort-on-drop
//! - `CheckoutSnapshot` — a read-only view for the presentation layer
//!
//! Execution is cooperative: controller operations are serialized behind
//! the session's async mutex, and the only suspension point is the timer.
//!
//! ## Example
//!
//! ```rust,ignore
//! let (events, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut checkout = CheckoutController::begin(cart, events).await?;
//!
//! checkout.update_delivery(delivery).await?;
//! checkout.continue_to_payment().await?;
//! checkout.update_card(card).await?;
//! checkout.pay().await?;
//! // six seconds later: cart cleared, Success notice, Navigate(Home)
//! ```

pub mod authorize;
pub mod controller;

use shop_core::Cart;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to a shopper's Cart Store
pub type SharedCart = Arc<Mutex<Cart>>;

pub use authorize::{start_authorization, AuthorizationGuard, AUTHORIZED_NOTICE};
pub use controller::{
    CardUpdate, CheckoutController, CheckoutSnapshot, DeliveryUpdate, AUTHORIZATION_SECS,
};
