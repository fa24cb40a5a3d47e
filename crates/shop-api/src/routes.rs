//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  /api/v1/products - List products
///   - GET  /api/v1/products/{id} - Get product by ID
///
/// - Shopper sessions:
///   - POST /api/v1/sessions - Create a session
///   - GET  /api/v1/sessions/{sid}/events - Drain notices/navigation intents
///
/// - Cart:
///   - GET    /api/v1/sessions/{sid}/cart - Contents + subtotal
///   - POST   /api/v1/sessions/{sid}/cart/items - Add or increment
///   - POST   /api/v1/sessions/{sid}/cart/items/{product_id}/decrement
///   - DELETE /api/v1/sessions/{sid}/cart/items/{product_id} - Remove line
///   - DELETE /api/v1/sessions/{sid}/cart - Clear
///
/// - Checkout:
///   - POST   /api/v1/sessions/{sid}/checkout - Begin (empty-cart guard)
///   - GET    /api/v1/sessions/{sid}/checkout - State snapshot
///   - PUT    /api/v1/sessions/{sid}/checkout/delivery - Delivery fields
///   - PUT    /api/v1/sessions/{sid}/checkout/card - Card fields
///   - POST   /api/v1/sessions/{sid}/checkout/continue - Delivery → Payment
///   - POST   /api/v1/sessions/{sid}/checkout/edit-delivery - Back to Delivery
///   - POST   /api/v1/sessions/{sid}/checkout/pay - Start authorization
///   - DELETE /api/v1/sessions/{sid}/checkout - Teardown (navigate away)
pub fn create_router(state: AppState) -> Router {
    // The storefront frontend is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cart_routes = Router::new()
        .route("/", get(handlers::get_cart).delete(handlers::clear_cart))
        .route("/items", post(handlers::add_cart_item))
        .route(
            "/items/{product_id}/decrement",
            post(handlers::decrement_cart_item),
        )
        .route("/items/{product_id}", delete(handlers::remove_cart_item));

    let checkout_routes = Router::new()
        .route(
            "/",
            post(handlers::begin_checkout)
                .get(handlers::get_checkout)
                .delete(handlers::teardown_checkout),
        )
        .route("/delivery", put(handlers::update_delivery))
        .route("/card", put(handlers::update_card))
        .route("/continue", post(handlers::checkout_continue))
        .route("/edit-delivery", post(handlers::checkout_edit_delivery))
        .route("/pay", post(handlers::checkout_pay));

    let session_routes = Router::new()
        .route("/", post(handlers::create_session))
        .route("/{sid}/events", get(handlers::drain_events))
        .nest("/{sid}/cart", cart_routes)
        .nest("/{sid}/checkout", checkout_routes);

    let api_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product))
        .nest("/sessions", session_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
