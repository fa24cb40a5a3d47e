//! # Request Handlers
//!
//! Axum request handlers for the storefront API. The presentation layer
//! calls these, renders the returned snapshots, and acts on drained events
//! (toasts and redirects happen there, not here).

use crate::sessions::ShopperSession;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shop_checkout::{CardUpdate, CheckoutSnapshot, DeliveryUpdate};
use shop_core::{Cart, StoreError, StoreEvent};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add-to-cart request
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Product ID (looked up in the catalog)
    pub product_id: u64,
    /// Size variant, if the shopper picked one
    #[serde(default)]
    pub size: Option<String>,
}

/// Session creation response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: String,
}

/// Cart contents plus derived totals
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<shop_core::CartItem>,
    pub subtotal: shop_core::Price,
    pub subtotal_display: String,
    pub item_count: u32,
}

impl CartResponse {
    fn from_cart(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            subtotal: cart.subtotal(),
            subtotal_display: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Drained events for the presentation layer
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<StoreEvent>,
    pub count: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

pub(crate) fn store_error_to_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

type ApiError = (StatusCode, Json<ErrorResponse>);

async fn session(state: &AppState, sid: Uuid) -> Result<Arc<ShopperSession>, ApiError> {
    state
        .sessions
        .get(sid)
        .await
        .map_err(store_error_to_response)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "flindor-shop",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List the product catalog
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "products": state.catalog.products,
        "count": state.catalog.len()
    }))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .catalog
        .get(product_id)
        .ok_or_else(|| store_error_to_response(StoreError::ProductNotFound { product_id }))?;

    Ok(Json(product.clone()))
}

/// Create a shopper session with an empty cart
#[instrument(skip(state))]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            created_at: session.created_at.to_rfc3339(),
        }),
    )
}

/// Get cart contents and derived totals
pub async fn get_cart(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CartResponse>, ApiError> {
    let session = session(&state, sid).await?;
    Ok(Json(CartResponse::from_cart(&session.cart().await)))
}

/// Add a product to the cart, or increment it when already present
#[instrument(skip(state), fields(product_id = request.product_id))]
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let session = session(&state, sid).await?;
    let product = state.catalog.get(request.product_id).ok_or_else(|| {
        store_error_to_response(StoreError::ProductNotFound {
            product_id: request.product_id,
        })
    })?;

    session.add_item(product, request.size).await;
    info!("added to cart: {}", product.title);
    Ok(Json(CartResponse::from_cart(&session.cart().await)))
}

/// Decrement a cart line by one; the last unit removes the line
pub async fn decrement_cart_item(
    State(state): State<AppState>,
    Path((sid, product_id)): Path<(Uuid, u64)>,
) -> Result<Json<CartResponse>, ApiError> {
    let session = session(&state, sid).await?;
    session.decrement_item(product_id).await;
    Ok(Json(CartResponse::from_cart(&session.cart().await)))
}

/// Remove a cart line regardless of quantity
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((sid, product_id)): Path<(Uuid, u64)>,
) -> Result<Json<CartResponse>, ApiError> {
    let session = session(&state, sid).await?;
    session.remove_item(product_id).await;
    Ok(Json(CartResponse::from_cart(&session.cart().await)))
}

/// Explicit "clear cart" action
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CartResponse>, ApiError> {
    let session = session(&state, sid).await?;
    session.clear_cart().await;
    Ok(Json(CartResponse::from_cart(&session.cart().await)))
}

/// Enter checkout (empty-cart guard applies)
#[instrument(skip(state))]
pub async fn begin_checkout(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session
        .begin_checkout()
        .await
        .map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Partial delivery-form update
pub async fn update_delivery(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(update): Json<DeliveryUpdate>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session
        .update_delivery(update)
        .await
        .map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Partial card-form update; values are live-formatted on write
pub async fn update_card(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(update): Json<CardUpdate>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session
        .update_card(update)
        .await
        .map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Delivery → Payment
pub async fn checkout_continue(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session
        .continue_to_payment()
        .await
        .map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Payment → Delivery for corrections
pub async fn checkout_edit_delivery(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session
        .edit_delivery()
        .await
        .map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Start the simulated payment authorization
#[instrument(skip(state))]
pub async fn checkout_pay(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session.pay().await.map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Current checkout state snapshot
pub async fn get_checkout(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CheckoutSnapshot>, ApiError> {
    let session = session(&state, sid).await?;
    let snapshot = session
        .checkout_snapshot()
        .await
        .map_err(store_error_to_response)?;
    Ok(Json(snapshot))
}

/// Navigation away from checkout: cancel pending timers, discard the flow
pub async fn teardown_checkout(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let session = session(&state, sid).await?;
    session.teardown_checkout().await;
    Ok(StatusCode::NO_CONTENT)
}

/// Drain pending notices and navigation intents
pub async fn drain_events(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<EventsResponse>, ApiError> {
    let session = session(&state, sid).await?;
    let events = session.drain_events().await;
    let count = events.len();
    Ok(Json(EventsResponse { events, count }))
}
