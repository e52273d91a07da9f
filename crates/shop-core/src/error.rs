//! # Payment Error Types
//!
//! Typed error handling for the storefront payment processors.
//! Every payment attempt returns `Result<PaymentReceipt, PaymentError>`.
//!
//! The set is closed: each variant carries no payload and maps to a fixed
//! customer-facing message.

use serde::Serialize;
use thiserror::Error;

/// Reasons a payment attempt can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentError {
    /// Amount is larger than the card balance
    #[error("Insufficient funds to complete the transaction.")]
    InsufficientFunds,

    /// Card details failed validation (also used for non-positive amounts)
    #[error("The card information is invalid.")]
    InvalidCard,

    /// Card expiry matched the expired sentinel
    #[error("The card has expired.")]
    CardExpired,

    /// Simulated network failure
    #[error("Network error occurred during payment processing.")]
    NetworkError,

    /// Amount is over the per-transaction limit
    #[error("The payment amount exceeds the allowed limit.")]
    PaymentLimitExceeded,

    /// Register cannot cover the amount
    #[error("Cash register is empty and cannot provide change.")]
    CashRegisterEmpty,
}

impl PaymentError {
    /// All variants, in declaration order
    pub const ALL: [PaymentError; 6] = [
        PaymentError::InsufficientFunds,
        PaymentError::InvalidCard,
        PaymentError::CardExpired,
        PaymentError::NetworkError,
        PaymentError::PaymentLimitExceeded,
        PaymentError::CashRegisterEmpty,
    ];

    /// Returns the fixed human-readable message for this error
    pub fn message(&self) -> &'static str {
        match self {
            PaymentError::InsufficientFunds => "Insufficient funds to complete the transaction.",
            PaymentError::InvalidCard => "The card information is invalid.",
            PaymentError::CardExpired => "The card has expired.",
            PaymentError::NetworkError => "Network error occurred during payment processing.",
            PaymentError::PaymentLimitExceeded => "The payment amount exceeds the allowed limit.",
            PaymentError::CashRegisterEmpty => "Cash register is empty and cannot provide change.",
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Errors from routing a payment through a [`ProcessorSelector`](crate::processor::ProcessorSelector)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// No processor registered under this id
    #[error("Unknown payment processor: {id}")]
    UnknownProcessor { id: String },

    /// The processor rejected the payment
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl SelectorError {
    /// The payment error, if the processor was found
    pub fn payment_error(&self) -> Option<PaymentError> {
        match self {
            SelectorError::Payment(err) => Some(*err),
            SelectorError::UnknownProcessor { .. } => None,
        }
    }
}
