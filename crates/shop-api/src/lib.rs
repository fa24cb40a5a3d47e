//! # shop-api
//!
//! HTTP API layer for the Flindor storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Shopper sessions with per-session cart and checkout flow
//! - An event drain carrying notices and navigation intents to the
//!   presentation layer
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/products` | List products |
//! | POST | `/api/v1/sessions` | Create shopper session |
//! | POST | `/api/v1/sessions/:sid/cart/items` | Add or increment |
//! | POST | `/api/v1/sessions/:sid/checkout` | Enter checkout |
//! | POST | `/api/v1/sessions/:sid/checkout/pay` | Simulated authorization |
//! | GET | `/api/v1/sessions/:sid/events` | Drain notices/nav intents |

pub mod handlers;
pub mod routes;
pub mod sessions;
pub mod state;

pub use routes::create_router;
pub use sessions::{SessionRegistry, ShopperSession};
pub use state::{AppConfig, AppState};
