//! Error types for the matching engine
//!
//! `BookError` is raised by a single order book, `EngineError` by the
//! registry that routes between books. Both classify into `ErrorKind` so a
//! transport can map outcomes without matching every variant.

use thiserror::Error;
use types::errors::OrderError;
use types::order::Side;

/// Coarse classification of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-correctable input; nothing was mutated
    Validation,
    /// Unknown order, unknown symbol, or empty side
    NotFound,
    /// The order is in a state that forbids the request
    Conflict,
    /// Invariant breach inside the engine
    Internal,
}

/// Errors raised by a single order book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid symbol: order for {actual} submitted to book {expected}")]
    InvalidSymbol { expected: String, actual: String },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    #[error("No liquidity on {side} side")]
    NoLiquidity { side: Side },

    #[error("Order already filled: {order_id}")]
    AlreadyFilled { order_id: String },

    #[error("Order already cancelled: {order_id}")]
    AlreadyCancelled { order_id: String },

    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl BookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::InvalidSymbol { .. } => ErrorKind::Validation,
            BookError::OrderNotFound { .. } | BookError::NoLiquidity { .. } => ErrorKind::NotFound,
            BookError::AlreadyFilled { .. } | BookError::AlreadyCancelled { .. } => {
                ErrorKind::Conflict
            }
            BookError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn internal(reason: impl Into<String>) -> Self {
        BookError::Internal {
            reason: reason.into(),
        }
    }
}

/// Errors raised by the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    #[error("Symbol limit reached: {limit} books")]
    SymbolLimitReached { limit: usize },

    #[error("Order quantity {quantity} exceeds maximum {maximum}")]
    QuantityAboveMaximum { quantity: String, maximum: String },

    #[error("Order price {price} below minimum {minimum}")]
    PriceBelowMinimum { price: String, minimum: String },

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Book error: {0}")]
    Book(#[from] BookError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::SymbolNotFound { .. } | EngineError::OrderNotFound { .. } => {
                ErrorKind::NotFound
            }
            EngineError::SymbolLimitReached { .. } => ErrorKind::Conflict,
            EngineError::QuantityAboveMaximum { .. }
            | EngineError::PriceBelowMinimum { .. }
            | EngineError::InvalidOrder(_)
            | EngineError::InvalidConfig { .. } => ErrorKind::Validation,
            EngineError::Book(err) => err.kind(),
        }
    }
}
