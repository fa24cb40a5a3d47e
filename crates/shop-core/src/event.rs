//! # Boundary Events
//!
//! Signals the core emits toward the presentation layer. Navigation intents
//! are requests, not actions: the caller performs the actual redirect.
//! Notice wording here matches the storefront copy, but triggering
//! conditions are the contract.

use serde::{Deserialize, Serialize};

/// A user-visible notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    /// A transition was rejected because input failed validation
    Validation(String),
    /// A step or the simulated payment completed successfully
    Success(String),
    /// Informational
    Info(String),
}

/// A navigation request emitted by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIntent {
    /// Go browse products (empty-cart guard)
    Catalog,
    /// Advance to the payment step
    PaymentStep,
    /// Go to the storefront home (post-checkout)
    Home,
}

/// Anything the core wants the presentation layer to act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum StoreEvent {
    Notice(Notice),
    Navigate(NavIntent),
}

impl StoreEvent {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreEvent::Notice(Notice::Validation(message.into()))
    }

    pub fn success(message: impl Into<String>) -> Self {
        StoreEvent::Notice(Notice::Success(message.into()))
    }

    pub fn info(message: impl Into<String>) -> Self {
        StoreEvent::Notice(Notice::Info(message.into()))
    }

    pub fn navigate(intent: NavIntent) -> Self {
        StoreEvent::Navigate(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = StoreEvent::validation("Please fill all card details");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "notice");
        assert_eq!(json["data"]["kind"], "validation");

        let nav = StoreEvent::navigate(NavIntent::Home);
        let json = serde_json::to_value(&nav).unwrap();
        assert_eq!(json["event"], "navigate");
        assert_eq!(json["data"], "home");
    }
}
