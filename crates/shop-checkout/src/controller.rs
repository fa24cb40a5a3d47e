//! # Checkout Session Controller
//!
//! Owns one checkout flow end to end: the empty-cart entry guard, field
//! input forwarding, the step transitions, and the simulated authorization.
//! Consumes a shared handle to the Cart Store and emits `StoreEvent`s over
//! the session's channel; the presentation layer performs the actual
//! redirects and toasts.

use crate::authorize::{start_authorization, AuthorizationGuard};
use crate::SharedCart;
use serde::{Deserialize, Serialize};
use shop_core::{
    mask_card, CheckoutSession, CheckoutStep, NavIntent, StoreError, StoreEvent, StoreResult,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, instrument};

/// Fixed duration of the simulated authorization
pub const AUTHORIZATION_SECS: u32 = 6;

/// Partial update for the delivery form; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Partial update for the card form; values are live-formatted on write
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardUpdate {
    pub cardholder_name: Option<String>,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}

/// Read-only view of the session for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSnapshot {
    pub step: CheckoutStep,
    pub can_continue_to_payment: bool,
    pub can_pay: bool,
    pub processing: bool,
    pub redirecting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<u32>,
    pub delivery: shop_core::DeliveryDetails,
    /// Card number masked to its last four digits
    pub card_masked: String,
    pub subtotal: shop_core::Price,
    pub item_count: u32,
}

/// Controller for one shopper's checkout flow
#[derive(Debug)]
pub struct CheckoutController {
    cart: SharedCart,
    session: Arc<Mutex<CheckoutSession>>,
    events: mpsc::UnboundedSender<StoreEvent>,
    authorization: Option<AuthorizationGuard>,
}

impl CheckoutController {
    /// Enter checkout. Guarded: with an empty cart there is nothing to buy,
    /// so the controller signals a redirect to the catalog instead of
    /// creating a session.
    pub async fn begin(
        cart: SharedCart,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> StoreResult<Self> {
        if cart.lock().await.is_empty() {
            let _ = events.send(StoreEvent::navigate(NavIntent::Catalog));
            return Err(StoreError::EmptyCart);
        }

        info!("checkout session started");
        Ok(Self {
            cart,
            session: Arc::new(Mutex::new(CheckoutSession::new())),
            events,
            authorization: None,
        })
    }

    /// Apply a partial delivery-form update. Rejected once processing has
    /// started; the fields are frozen mid-authorization.
    pub async fn update_delivery(&self, update: DeliveryUpdate) -> StoreResult<()> {
        let mut session = self.session.lock().await;
        let delivery = session.delivery_mut()?;
        if let Some(v) = update.full_name {
            delivery.full_name = v;
        }
        if let Some(v) = update.email {
            delivery.email = v;
        }
        if let Some(v) = update.phone {
            delivery.phone = v;
        }
        if let Some(v) = update.street {
            delivery.street = v;
        }
        if let Some(v) = update.city {
            delivery.city = v;
        }
        if let Some(v) = update.state {
            delivery.state = v;
        }
        if let Some(v) = update.postal_code {
            delivery.postal_code = v;
        }
        Ok(())
    }

    /// Apply a partial card-form update; each value goes through its live
    /// formatter.
    pub async fn update_card(&self, update: CardUpdate) -> StoreResult<()> {
        let mut session = self.session.lock().await;
        if let Some(v) = update.cardholder_name {
            session.set_cardholder_name(&v)?;
        }
        if let Some(v) = update.card_number {
            session.set_card_number(&v)?;
        }
        if let Some(v) = update.expiry {
            session.set_expiry(&v)?;
        }
        if let Some(v) = update.cvv {
            session.set_cvv(&v)?;
        }
        Ok(())
    }

    /// Delivery → Payment. A rejected attempt raises a validation notice
    /// and leaves the step unchanged.
    #[instrument(skip(self))]
    pub async fn continue_to_payment(&self) -> StoreResult<()> {
        let mut session = self.session.lock().await;
        match session.continue_to_payment() {
            Ok(()) => {
                let _ = self.events.send(StoreEvent::success("Delivery details saved"));
                let _ = self.events.send(StoreEvent::navigate(NavIntent::PaymentStep));
                Ok(())
            }
            Err(err) => {
                if let StoreError::ValidationFailed { message } = &err {
                    let _ = self.events.send(StoreEvent::validation(message.clone()));
                }
                Err(err)
            }
        }
    }

    /// Payment → Delivery for corrections; card fields are preserved
    pub async fn edit_delivery(&self) -> StoreResult<()> {
        self.session.lock().await.edit_delivery()
    }

    /// Start the simulated authorization. A rejected attempt raises a
    /// validation notice and keeps the phase idle; a granted one schedules
    /// the completion once for the full delay and starts the cosmetic
    /// countdown ticker.
    #[instrument(skip(self))]
    pub async fn pay(&mut self) -> StoreResult<()> {
        {
            let mut session = self.session.lock().await;
            if let Err(err) = session.begin_processing(AUTHORIZATION_SECS) {
                if let StoreError::ValidationFailed { message } = &err {
                    let _ = self.events.send(StoreEvent::validation(message.clone()));
                }
                return Err(err);
            }
        }

        info!(delay_secs = AUTHORIZATION_SECS, "payment authorization started");
        self.authorization = Some(start_authorization(
            Duration::from_secs(u64::from(AUTHORIZATION_SECS)),
            Arc::clone(&self.cart),
            Arc::clone(&self.session),
            self.events.clone(),
        ));
        Ok(())
    }

    /// True while an authorization is processing or the post-payment
    /// redirect is pending. While active, the session must not be destroyed
    /// by cart-emptiness checks.
    pub async fn payment_active(&self) -> bool {
        let session = self.session.lock().await;
        session.is_processing() || session.is_redirecting()
    }

    /// Cancel any pending authorization timers. Unconditional; also invoked
    /// by `Drop` so navigation away can never leak a stray completion.
    pub fn teardown(&mut self) {
        if let Some(guard) = self.authorization.take() {
            guard.cancel();
            info!("checkout session torn down, timers canceled");
        }
    }

    /// Snapshot for rendering
    pub async fn snapshot(&self) -> CheckoutSnapshot {
        let session = self.session.lock().await;
        let cart = self.cart.lock().await;
        CheckoutSnapshot {
            step: session.step(),
            can_continue_to_payment: session.can_continue_to_payment(),
            can_pay: session.can_pay(),
            processing: session.is_processing(),
            redirecting: session.is_redirecting(),
            seconds_remaining: session.seconds_remaining(),
            delivery: session.delivery().clone(),
            card_masked: mask_card(&session.card().card_number),
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{Cart, CartItem, Notice, PaymentPhase, Price, Product};

    fn cart_with_one_service() -> SharedCart {
        let product = Product::new(26, "Cleaning", Price::new(35000), "Services");
        let mut cart = Cart::new();
        cart.add_or_increment(CartItem::from_product(&product, None));
        Arc::new(Mutex::new(cart))
    }

    fn valid_delivery() -> DeliveryUpdate {
        DeliveryUpdate {
            full_name: Some("Jo".into()),
            email: Some("a@b.com".into()),
            phone: Some("08012345678".into()),
            street: Some("1 Ikoyi Rd".into()),
            city: Some("Lagos".into()),
            state: Some("Lagos".into()),
            postal_code: Some("100001".into()),
        }
    }

    fn valid_card() -> CardUpdate {
        CardUpdate {
            cardholder_name: Some("Jo Shopper".into()),
            card_number: Some("4111111111111111".into()),
            expiry: Some("1225".into()),
            cvv: Some("123".into()),
        }
    }

    #[tokio::test]
    async fn test_begin_rejects_empty_cart() {
        let cart = Arc::new(Mutex::new(Cart::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = CheckoutController::begin(cart, tx).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyCart));
        assert_eq!(
            rx.try_recv().unwrap(),
            StoreEvent::navigate(NavIntent::Catalog)
        );
    }

    #[tokio::test]
    async fn test_continue_rejection_emits_validation_notice() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let controller = CheckoutController::begin(cart_with_one_service(), tx)
            .await
            .unwrap();

        assert!(controller.continue_to_payment().await.is_err());
        assert!(matches!(
            rx.try_recv().unwrap(),
            StoreEvent::Notice(Notice::Validation(_))
        ));

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.step, CheckoutStep::Delivery);
    }

    #[tokio::test]
    async fn test_pay_rejected_before_payment_step() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = CheckoutController::begin(cart_with_one_service(), tx)
            .await
            .unwrap();
        controller.update_delivery(valid_delivery()).await.unwrap();

        assert!(controller.pay().await.is_err());
        assert!(!controller.snapshot().await.processing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_pay_flow() {
        let cart = cart_with_one_service();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut controller = CheckoutController::begin(Arc::clone(&cart), tx)
            .await
            .unwrap();

        controller.update_delivery(valid_delivery()).await.unwrap();
        controller.update_card(valid_card()).await.unwrap();
        controller.continue_to_payment().await.unwrap();
        controller.pay().await.unwrap();

        let snapshot = controller.snapshot().await;
        assert!(snapshot.processing);
        assert_eq!(snapshot.seconds_remaining, Some(AUTHORIZATION_SECS));
        assert_eq!(snapshot.card_masked, "**** **** **** 1111");

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(6)).await;
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }

        let snapshot = controller.snapshot().await;
        assert!(!snapshot.processing);
        assert!(snapshot.redirecting);
        assert!(cart.lock().await.is_empty());

        // Drain: saved notice, payment-step nav, success notice, home nav.
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.contains(&StoreEvent::navigate(NavIntent::Home)));
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::Notice(Notice::Success(_)))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_two_seconds_in_cancels_completion() {
        let cart = cart_with_one_service();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = CheckoutController::begin(Arc::clone(&cart), tx)
            .await
            .unwrap();

        controller.update_delivery(valid_delivery()).await.unwrap();
        controller.update_card(valid_card()).await.unwrap();
        controller.continue_to_payment().await.unwrap();
        controller.pay().await.unwrap();

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        controller.teardown();

        // The original six-second mark passes with nothing listening.
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;

        assert_eq!(cart.lock().await.item_count(), 1);
        assert!(!controller.snapshot().await.redirecting);
    }

    #[tokio::test]
    async fn test_delivery_frozen_while_processing() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = CheckoutController::begin(cart_with_one_service(), tx)
            .await
            .unwrap();

        controller.update_delivery(valid_delivery()).await.unwrap();
        controller.update_card(valid_card()).await.unwrap();
        controller.continue_to_payment().await.unwrap();
        controller.pay().await.unwrap();

        let err = controller
            .update_delivery(DeliveryUpdate {
                city: Some("Abuja".into()),
                ..DeliveryUpdate::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PaymentInFlight));
        assert!(matches!(
            controller.edit_delivery().await.unwrap_err(),
            StoreError::PaymentInFlight
        ));
        assert!(controller.payment_active().await);
        controller.teardown();
    }

    #[tokio::test]
    async fn test_edit_delivery_round_trip_keeps_card() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let controller = CheckoutController::begin(cart_with_one_service(), tx)
            .await
            .unwrap();

        controller.update_delivery(valid_delivery()).await.unwrap();
        controller.update_card(valid_card()).await.unwrap();
        controller.continue_to_payment().await.unwrap();
        controller.edit_delivery().await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.step, CheckoutStep::Delivery);
        assert_eq!(snapshot.card_masked, "**** **** **** 1111");

        // And back again: the saved fields still validate.
        controller.continue_to_payment().await.unwrap();
        assert_eq!(
            controller.snapshot().await.step,
            CheckoutStep::Payment(PaymentPhase::Idle)
        );
    }
}
