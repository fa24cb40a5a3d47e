//! # Storefront Error Types
//!
//! Typed error handling for the cart and checkout core.
//! Fallible operations return `Result<T, StoreError>`.
//!
//! None of these are fatal: every variant maps to a state the shopper can
//! recover from locally (fix a field, retry, keep shopping).

use thiserror::Error;

/// Core error type for cart and checkout operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A delivery or card field failed validation
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// Checkout was entered (or an operation attempted) with an empty cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: u64 },

    /// Operation rejected because a payment attempt is in flight
    #[error("Payment is being processed; delivery details are frozen")]
    PaymentInFlight,

    /// A checkout transition was requested from the wrong step
    #[error("Invalid checkout transition: {message}")]
    InvalidTransition { message: String },

    /// No checkout session is active for this shopper
    #[error("No active checkout session")]
    NoActiveCheckout,

    /// Shopper session expired or not found
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Catalog provider error (recovered by falling back; never touches the cart)
    #[error("Catalog provider error: {0}")]
    CatalogUnavailable(String),
}

impl StoreError {
    /// Convenience constructor for field validation failures
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::ValidationFailed {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::ValidationFailed { .. } => 422,
            StoreError::EmptyCart => 409,
            StoreError::ProductNotFound { .. } => 404,
            StoreError::PaymentInFlight => 409,
            StoreError::InvalidTransition { .. } => 409,
            StoreError::NoActiveCheckout => 404,
            StoreError::SessionNotFound { .. } => 404,
            StoreError::CatalogUnavailable(_) => 503,
        }
    }

    /// True if the shopper can fix this by editing their input
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            StoreError::ValidationFailed { .. } | StoreError::EmptyCart
        )
    }
}

/// Result type alias for cart and checkout operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StoreError::validation("bad email").status_code(), 422);
        assert_eq!(
            StoreError::ProductNotFound { product_id: 9 }.status_code(),
            404
        );
        assert_eq!(StoreError::PaymentInFlight.status_code(), 409);
        assert_eq!(
            StoreError::CatalogUnavailable("timeout".into()).status_code(),
            503
        );
    }

    #[test]
    fn test_user_correctable() {
        assert!(StoreError::validation("short name").is_user_correctable());
        assert!(StoreError::EmptyCart.is_user_correctable());
        assert!(!StoreError::PaymentInFlight.is_user_correctable());
    }
}
