//! Error types for order and numeric validation
//!
//! Errors raised by the leaf types. The matching engine wraps these in its
//! own taxonomy; nothing here knows about books or symbols routing.

use thiserror::Error;

/// Numeric construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("Quantity must not be negative, got {0}")]
    NegativeQuantity(String),

    #[error("Invalid decimal literal: {0}")]
    Parse(String),
}

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Fill quantity must be positive, got {quantity}")]
    InvalidFill { quantity: String },

    #[error("Order already cancelled: {order_id}")]
    AlreadyCancelled { order_id: String },

    #[error("Order already filled: {order_id}")]
    AlreadyFilled { order_id: String },

    #[error("Fill of {requested} exceeds order {order_id} (filled {filled} of {quantity})")]
    Overfill {
        order_id: String,
        filled: String,
        requested: String,
        quantity: String,
    },
}

impl From<NumericError> for OrderError {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::NonPositivePrice(value) => OrderError::InvalidPrice(value),
            NumericError::NegativeQuantity(value) => OrderError::InvalidQuantity(value),
            NumericError::Parse(value) => OrderError::InvalidQuantity(value),
        }
    }
}
