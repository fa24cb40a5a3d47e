//! # Shopper Sessions
//!
//! One `ShopperSession` per browsing session: the cart, the event channel
//! toward the presentation layer, and the checkout flow when one is active.
//! Everything here is ephemeral; nothing survives a restart.
//!
//! A session's operations are serialized behind its async mutexes, so cart
//! mutations are applied in the order received and a subtotal read after any
//! operation reflects exactly that operation and all prior ones.

use chrono::{DateTime, Utc};
use shop_core::{
    Cart, CartItem, NavIntent, Product, StoreError, StoreEvent, StoreResult,
};
use shop_checkout::{
    CardUpdate, CheckoutController, CheckoutSnapshot, DeliveryUpdate, SharedCart,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

/// State scoped to one shopper's browsing session
#[derive(Debug)]
pub struct ShopperSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    cart: SharedCart,
    events_tx: mpsc::UnboundedSender<StoreEvent>,
    events_rx: Mutex<mpsc::UnboundedReceiver<StoreEvent>>,
    checkout: Mutex<Option<CheckoutController>>,
}

impl ShopperSession {
    fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            cart: Arc::new(Mutex::new(Cart::new())),
            events_tx,
            events_rx: Mutex::new(events_rx),
            checkout: Mutex::new(None),
        }
    }

    /// Read the cart for rendering
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add-or-increment from a catalog product
    pub async fn add_item(&self, product: &Product, size: Option<String>) {
        self.cart
            .lock()
            .await
            .add_or_increment(CartItem::from_product(product, size));
    }

    /// Decrement a line; removes it on the last unit
    pub async fn decrement_item(&self, product_id: u64) {
        self.cart.lock().await.decrement(product_id);
        self.close_checkout_if_cart_emptied().await;
    }

    /// Delete a line regardless of quantity
    pub async fn remove_item(&self, product_id: u64) {
        self.cart.lock().await.remove(product_id);
        self.close_checkout_if_cart_emptied().await;
    }

    /// Explicit "clear cart" action
    pub async fn clear_cart(&self) {
        self.cart.lock().await.clear();
        self.close_checkout_if_cart_emptied().await;
    }

    /// A checkout session does not outlive its cart: when a mutation empties
    /// the cart and no payment attempt is in flight, the flow is torn down
    /// and the shopper is pointed back at the catalog.
    async fn close_checkout_if_cart_emptied(&self) {
        if !self.cart.lock().await.is_empty() {
            return;
        }
        let mut checkout = self.checkout.lock().await;
        let payment_active = match checkout.as_ref() {
            Some(controller) => controller.payment_active().await,
            None => return,
        };
        if payment_active {
            return;
        }
        if let Some(mut controller) = checkout.take() {
            controller.teardown();
        }
        let _ = self.events_tx.send(StoreEvent::info("Your cart is empty"));
        let _ = self.events_tx.send(StoreEvent::navigate(NavIntent::Catalog));
        info!(session = %self.id, "cart emptied, checkout closed");
    }

    /// Enter checkout. Guarded against an empty cart by the controller;
    /// re-entering while a flow is active keeps the existing flow.
    pub async fn begin_checkout(&self) -> StoreResult<CheckoutSnapshot> {
        let mut checkout = self.checkout.lock().await;
        match checkout.as_ref() {
            Some(controller) => Ok(controller.snapshot().await),
            None => {
                let controller =
                    CheckoutController::begin(Arc::clone(&self.cart), self.events_tx.clone())
                        .await?;
                let snapshot = controller.snapshot().await;
                *checkout = Some(controller);
                Ok(snapshot)
            }
        }
    }

    pub async fn update_delivery(&self, update: DeliveryUpdate) -> StoreResult<CheckoutSnapshot> {
        let mut checkout = self.checkout.lock().await;
        let controller = checkout.as_mut().ok_or(StoreError::NoActiveCheckout)?;
        controller.update_delivery(update).await?;
        Ok(controller.snapshot().await)
    }

    pub async fn update_card(&self, update: CardUpdate) -> StoreResult<CheckoutSnapshot> {
        let mut checkout = self.checkout.lock().await;
        let controller = checkout.as_mut().ok_or(StoreError::NoActiveCheckout)?;
        controller.update_card(update).await?;
        Ok(controller.snapshot().await)
    }

    pub async fn continue_to_payment(&self) -> StoreResult<CheckoutSnapshot> {
        let mut checkout = self.checkout.lock().await;
        let controller = checkout.as_mut().ok_or(StoreError::NoActiveCheckout)?;
        controller.continue_to_payment().await?;
        Ok(controller.snapshot().await)
    }

    pub async fn edit_delivery(&self) -> StoreResult<CheckoutSnapshot> {
        let mut checkout = self.checkout.lock().await;
        let controller = checkout.as_mut().ok_or(StoreError::NoActiveCheckout)?;
        controller.edit_delivery().await?;
        Ok(controller.snapshot().await)
    }

    pub async fn pay(&self) -> StoreResult<CheckoutSnapshot> {
        let mut checkout = self.checkout.lock().await;
        let controller = checkout.as_mut().ok_or(StoreError::NoActiveCheckout)?;
        controller.pay().await?;
        Ok(controller.snapshot().await)
    }

    pub async fn checkout_snapshot(&self) -> StoreResult<CheckoutSnapshot> {
        let checkout = self.checkout.lock().await;
        match checkout.as_ref() {
            Some(controller) => Ok(controller.snapshot().await),
            None => Err(StoreError::NoActiveCheckout),
        }
    }

    /// Navigation away from checkout: cancel any pending authorization
    /// timers and discard the flow. Unconditional and idempotent.
    pub async fn teardown_checkout(&self) {
        if let Some(mut controller) = self.checkout.lock().await.take() {
            controller.teardown();
            info!(session = %self.id, "checkout torn down");
        }
    }

    /// Drain pending notices and navigation intents for the presentation
    /// layer to act on
    pub async fn drain_events(&self) -> Vec<StoreEvent> {
        let mut rx = self.events_rx.lock().await;
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Process-wide registry of shopper sessions
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Arc<ShopperSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session with an empty cart
    pub async fn create(&self) -> Arc<ShopperSession> {
        let session = Arc::new(ShopperSession::new());
        self.inner
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        info!(session = %session.id, "shopper session created");
        session
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Arc<ShopperSession>> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound {
                session_id: id.to_string(),
            })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
