//! # Checkout Session State Machine
//!
//! Pure step/phase state for a checkout flow: Delivery → Payment →
//! Processing → Redirecting. States are a closed tagged set so illegal flag
//! combinations (processing while still at Delivery, for example) are
//! unrepresentable. All gating predicates are pure functions of the current
//! field state, never cached booleans.
//!
//! The timed authorization itself lives in `shop-checkout`; this module only
//! records phase changes and the cosmetic countdown.

use crate::error::{StoreError, StoreResult};
use crate::fields::{
    format_card_number, format_expiry, sanitize_cvv, CardDetails, DeliveryDetails,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sub-state of the Payment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PaymentPhase {
    /// Form visible, no attempt in flight
    Idle,
    /// Simulated authorization running; the countdown is display-only and
    /// never gates completion
    Processing { seconds_remaining: u32 },
    /// Authorization done, cart cleared, waiting for the home redirect
    Redirecting,
}

/// Current checkout step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CheckoutStep {
    Delivery,
    Payment(PaymentPhase),
}

/// The bounded, stateful flow from delivery entry through simulated payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    step: CheckoutStep,
    delivery: DeliveryDetails,
    card: CardDetails,
    pub created_at: DateTime<Utc>,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    /// Start a fresh session at the Delivery step. The non-empty-cart guard
    /// is the controller's job; the state machine assumes entry was allowed.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Delivery,
            delivery: DeliveryDetails::default(),
            card: CardDetails::default(),
            created_at: Utc::now(),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn delivery(&self) -> &DeliveryDetails {
        &self.delivery
    }

    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    pub fn is_processing(&self) -> bool {
        matches!(
            self.step,
            CheckoutStep::Payment(PaymentPhase::Processing { .. })
        )
    }

    pub fn is_redirecting(&self) -> bool {
        matches!(self.step, CheckoutStep::Payment(PaymentPhase::Redirecting))
    }

    /// Countdown seconds, when an authorization is in flight
    pub fn seconds_remaining(&self) -> Option<u32> {
        match self.step {
            CheckoutStep::Payment(PaymentPhase::Processing { seconds_remaining }) => {
                Some(seconds_remaining)
            }
            _ => None,
        }
    }

    /// Mutable delivery access, only while the Delivery step is active.
    /// Delivery input is frozen from the moment processing starts.
    pub fn delivery_mut(&mut self) -> StoreResult<&mut DeliveryDetails> {
        match self.step {
            CheckoutStep::Delivery => Ok(&mut self.delivery),
            CheckoutStep::Payment(PaymentPhase::Idle) => Err(StoreError::InvalidTransition {
                message: "use edit-delivery to return to the delivery step".into(),
            }),
            CheckoutStep::Payment(_) => Err(StoreError::PaymentInFlight),
        }
    }

    fn card_mut(&mut self) -> StoreResult<&mut CardDetails> {
        match self.step {
            CheckoutStep::Payment(PaymentPhase::Processing { .. })
            | CheckoutStep::Payment(PaymentPhase::Redirecting) => {
                Err(StoreError::PaymentInFlight)
            }
            _ => Ok(&mut self.card),
        }
    }

    pub fn set_cardholder_name(&mut self, name: &str) -> StoreResult<()> {
        self.card_mut()?.cardholder_name = name.to_string();
        Ok(())
    }

    /// Stores the live-formatted rendering (blocks of four)
    pub fn set_card_number(&mut self, input: &str) -> StoreResult<()> {
        self.card_mut()?.card_number = format_card_number(input);
        Ok(())
    }

    /// Stores the live-formatted `MM/YY` rendering
    pub fn set_expiry(&mut self, input: &str) -> StoreResult<()> {
        self.card_mut()?.expiry = format_expiry(input);
        Ok(())
    }

    /// Discards non-digits and anything beyond three digits
    pub fn set_cvv(&mut self, input: &str) -> StoreResult<()> {
        self.card_mut()?.cvv = sanitize_cvv(input);
        Ok(())
    }

    /// Logical AND of all delivery-field validities
    pub fn can_continue_to_payment(&self) -> bool {
        self.delivery.is_complete()
    }

    /// Delivery validity plus all card-field validities
    pub fn can_pay(&self) -> bool {
        self.can_continue_to_payment() && self.card.is_complete()
    }

    /// Delivery → Payment, gated by `can_continue_to_payment`. A rejected
    /// attempt leaves the step unchanged.
    pub fn continue_to_payment(&mut self) -> StoreResult<()> {
        match self.step {
            CheckoutStep::Delivery => {
                if !self.can_continue_to_payment() {
                    return Err(StoreError::validation("Please fill all delivery details"));
                }
                self.step = CheckoutStep::Payment(PaymentPhase::Idle);
                Ok(())
            }
            CheckoutStep::Payment(_) => Err(StoreError::InvalidTransition {
                message: "already past the delivery step".into(),
            }),
        }
    }

    /// Payment → Delivery, always allowed while idle; card fields are kept.
    /// Never allowed once processing has started.
    pub fn edit_delivery(&mut self) -> StoreResult<()> {
        match self.step {
            CheckoutStep::Payment(PaymentPhase::Idle) => {
                self.step = CheckoutStep::Delivery;
                Ok(())
            }
            CheckoutStep::Delivery => Err(StoreError::InvalidTransition {
                message: "already at the delivery step".into(),
            }),
            CheckoutStep::Payment(_) => Err(StoreError::PaymentInFlight),
        }
    }

    /// Payment(Idle) → Processing, gated by `can_pay`. A rejected attempt
    /// leaves the phase idle.
    pub fn begin_processing(&mut self, total_secs: u32) -> StoreResult<()> {
        match self.step {
            CheckoutStep::Payment(PaymentPhase::Idle) => {
                if !self.can_pay() {
                    return Err(StoreError::validation("Please fill all card details"));
                }
                self.step = CheckoutStep::Payment(PaymentPhase::Processing {
                    seconds_remaining: total_secs,
                });
                Ok(())
            }
            CheckoutStep::Payment(PaymentPhase::Processing { .. }) => {
                Err(StoreError::PaymentInFlight)
            }
            CheckoutStep::Delivery | CheckoutStep::Payment(PaymentPhase::Redirecting) => {
                Err(StoreError::InvalidTransition {
                    message: "pay is only available from the payment step".into(),
                })
            }
        }
    }

    /// Cosmetic countdown decrement. Does not gate completion and never
    /// drifts the underlying timer; ignored outside Processing.
    pub fn tick(&mut self) {
        if let CheckoutStep::Payment(PaymentPhase::Processing { seconds_remaining }) =
            &mut self.step
        {
            *seconds_remaining = seconds_remaining.saturating_sub(1);
        }
    }

    /// Processing → Redirecting, once the full authorization delay elapsed
    pub fn complete_authorization(&mut self) -> StoreResult<()> {
        match self.step {
            CheckoutStep::Payment(PaymentPhase::Processing { .. }) => {
                self.step = CheckoutStep::Payment(PaymentPhase::Redirecting);
                Ok(())
            }
            _ => Err(StoreError::InvalidTransition {
                message: "no authorization in flight".into(),
            }),
        }
    }
}
