//! # Simulated Payment Authorization
//!
//! The timed stand-in for a payment-processor round trip. Starting an
//! authorization spawns two tasks under one owned guard:
//!
//! - a completion task that sleeps once for the full delay, then clears the
//!   cart, flips the session to redirecting, and emits the success notice
//!   and home navigation
//! - a ticker that decrements the display countdown every second; it is
//!   cosmetic only and never gates or drifts the completion
//!
//! Dropping the guard aborts both tasks unconditionally, so a torn-down
//! session can never fire a stray cart-clear or redirect.

use crate::SharedCart;
use shop_core::{CheckoutSession, NavIntent, StoreEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Notice surfaced when the simulated authorization completes
pub const AUTHORIZED_NOTICE: &str = "Payment processed successfully. We will send a \
     verification code to your email or phone number.";

/// Owned handle for an in-flight authorization. Cancellation is the single
/// entry point for every exit path; `Drop` invokes it so teardown cannot
/// forget.
#[derive(Debug)]
pub struct AuthorizationGuard {
    completion: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl AuthorizationGuard {
    /// Abort both timer tasks. Unconditional: safe to call whether or not
    /// the authorization already completed.
    pub fn cancel(&self) {
        self.completion.abort();
        self.ticker.abort();
        debug!("authorization timers canceled");
    }

    /// True once the completion task has run (or been aborted)
    pub fn is_finished(&self) -> bool {
        self.completion.is_finished()
    }
}

impl Drop for AuthorizationGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start the fixed-duration authorization. The completion is scheduled once
/// for the full delay; per-second ticks only update the visible countdown.
pub fn start_authorization(
    delay: Duration,
    cart: SharedCart,
    session: Arc<Mutex<CheckoutSession>>,
    events: mpsc::UnboundedSender<StoreEvent>,
) -> AuthorizationGuard {
    let ticker = tokio::spawn({
        let session = Arc::clone(&session);
        async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick resolves immediately; skip it so the countdown
            // decrements once per elapsed second.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut session = session.lock().await;
                if !session.is_processing() {
                    break;
                }
                session.tick();
            }
        }
    });

    let completion = tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let mut session = session.lock().await;
        match session.complete_authorization() {
            Ok(()) => {
                cart.lock().await.clear();
                info!("simulated authorization complete, cart cleared");
                let _ = events.send(StoreEvent::success(AUTHORIZED_NOTICE));
                let _ = events.send(StoreEvent::navigate(NavIntent::Home));
            }
            Err(err) => {
                // Completion raced a state change it should never race;
                // leave the cart alone.
                warn!("authorization completion skipped: {err}");
            }
        }
    });

    AuthorizationGuard { completion, ticker }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{Cart, CartItem, Price, Product};

    fn loaded_cart() -> SharedCart {
        let product = Product::new(26, "Cleaning", Price::new(35000), "Services");
        let mut cart = Cart::new();
        cart.add_or_increment(CartItem::from_product(&product, None));
        Arc::new(Mutex::new(cart))
    }

    fn processing_session() -> Arc<Mutex<CheckoutSession>> {
        let mut session = CheckoutSession::new();
        {
            let delivery = session.delivery_mut().unwrap();
            delivery.full_name = "Jo".into();
            delivery.email = "a@b.com".into();
            delivery.phone = "08012345678".into();
            delivery.street = "1 Ikoyi Rd".into();
            delivery.city = "Lagos".into();
            delivery.state = "Lagos".into();
            delivery.postal_code = "100001".into();
        }
        session.set_cardholder_name("Jo Shopper").unwrap();
        session.set_card_number("4111111111111111").unwrap();
        session.set_expiry("1225").unwrap();
        session.set_cvv("123").unwrap();
        session.continue_to_payment().unwrap();
        session.begin_processing(6).unwrap();
        Arc::new(Mutex::new(session))
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_clears_cart_and_redirects() {
        let cart = loaded_cart();
        let session = processing_session();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let guard = start_authorization(
            Duration::from_secs(6),
            Arc::clone(&cart),
            Arc::clone(&session),
            tx,
        );
        // Let the spawned tasks register their timers before advancing.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(6)).await;
        tokio::task::yield_now().await;
        while !guard.is_finished() {
            tokio::task::yield_now().await;
        }

        assert!(cart.lock().await.is_empty());
        assert!(session.lock().await.is_redirecting());

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first,
            StoreEvent::Notice(shop_core::Notice::Success(_))
        ));
        let second = rx.recv().await.unwrap();
        assert_eq!(second, StoreEvent::navigate(NavIntent::Home));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_midway_prevents_completion() {
        let cart = loaded_cart();
        let session = processing_session();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let guard = start_authorization(
            Duration::from_secs(6),
            Arc::clone(&cart),
            Arc::clone(&session),
            tx,
        );
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(2)).await;
        drop(guard); // teardown two seconds in

        // Let the original six-second mark pass.
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;

        assert_eq!(cart.lock().await.item_count(), 1);
        assert!(!session.lock().await.is_redirecting());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_counts_down_each_second() {
        let cart = loaded_cart();
        let session = processing_session();
        let (tx, _rx) = mpsc::unbounded_channel();

        let _guard = start_authorization(
            Duration::from_secs(6),
            Arc::clone(&cart),
            Arc::clone(&session),
            tx,
        );
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(session.lock().await.seconds_remaining(), Some(5));

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(session.lock().await.seconds_remaining(), Some(3));
    }
}
