//! Order lifecycle types
//!
//! An order moves `New -> PartialFill* -> Filled`, or from `New` or
//! `PartialFill` to `Cancelled`. `Filled` and `Cancelled` are terminal.
//! `fill` and `cancel` validate before mutating, so a failed call leaves
//! the order untouched.

use crate::errors::OrderError;
use crate::ids::{IdGenerator, OrderId, Symbol};
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

/// Order status, derived from the filled amount except for `Cancelled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// State 0: Accepted, nothing filled
    New,

    /// State 1: Partially matched
    PartialFill,

    /// State 2: Completely matched (terminal)
    Filled,

    /// State 3: Cancelled by request (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }

    /// Get the state ID for wire protocol
    pub fn state_id(&self) -> u8 {
        match self {
            OrderStatus::New => 0,
            OrderStatus::PartialFill => 1,
            OrderStatus::Filled => 2,
            OrderStatus::Cancelled => 3,
        }
    }
}

/// A single limit order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
    pub filled_quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
    pub updated_at: i64, // Unix nanos
    pub version: u64,
}

impl Order {
    /// Create a new order with nothing filled
    ///
    /// Fails with `InvalidQuantity` if `quantity` is zero.
    pub fn new(
        order_id: OrderId,
        side: Side,
        symbol: Symbol,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Result<Self, OrderError> {
        if !quantity.is_positive() {
            return Err(OrderError::InvalidQuantity(quantity.to_string()));
        }

        Ok(Self {
            order_id,
            side,
            symbol,
            price,
            quantity,
            filled_quantity: Quantity::zero(),
            status: OrderStatus::New,
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        })
    }

    /// Validate raw input and build an order with a freshly generated id
    pub fn create(
        ids: &dyn IdGenerator,
        side: Side,
        symbol: &str,
        price: Decimal,
        quantity: Decimal,
        timestamp: i64,
    ) -> Result<Self, OrderError> {
        let price = Price::try_new(price)?;
        if quantity <= Decimal::ZERO {
            return Err(OrderError::InvalidQuantity(quantity.to_string()));
        }
        let quantity = Quantity::try_new(quantity)?;
        let symbol = Symbol::try_new(symbol)?;

        Self::new(ids.next_order_id(), side, symbol, price, quantity, timestamp)
    }

    /// Unfilled quantity
    pub fn remaining(&self) -> Quantity {
        // filled <= quantity is an invariant, so this never saturates
        self.quantity
            .checked_sub(self.filled_quantity)
            .unwrap_or(Quantity::zero())
    }

    /// Check quantity invariant and status consistency
    pub fn check_invariant(&self) -> bool {
        let filled = self.filled_quantity;
        if filled > self.quantity {
            return false;
        }
        match self.status {
            OrderStatus::New => filled.is_zero(),
            OrderStatus::PartialFill => filled.is_positive() && filled < self.quantity,
            OrderStatus::Filled => filled == self.quantity,
            OrderStatus::Cancelled => filled < self.quantity,
        }
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Neither filled nor cancelled
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Check if order has any fills
    pub fn has_fills(&self) -> bool {
        !self.filled_quantity.is_zero()
    }

    /// Run every `fill` precondition without mutating
    pub fn can_fill(&self, quantity: Quantity) -> Result<(), OrderError> {
        if !quantity.is_positive() {
            return Err(OrderError::InvalidFill {
                quantity: quantity.to_string(),
            });
        }
        if self.status == OrderStatus::Cancelled {
            return Err(OrderError::AlreadyCancelled {
                order_id: self.order_id.to_string(),
            });
        }
        if self.filled_quantity + quantity > self.quantity {
            return Err(OrderError::Overfill {
                order_id: self.order_id.to_string(),
                filled: self.filled_quantity.to_string(),
                requested: quantity.to_string(),
                quantity: self.quantity.to_string(),
            });
        }
        Ok(())
    }

    /// Update filled quantity and adjust status
    pub fn fill(&mut self, quantity: Quantity, timestamp: i64) -> Result<(), OrderError> {
        self.can_fill(quantity)?;

        self.filled_quantity = self.filled_quantity + quantity;
        self.status = if self.filled_quantity == self.quantity {
            OrderStatus::Filled
        } else {
            OrderStatus::PartialFill
        };
        self.updated_at = timestamp;
        self.version += 1;

        debug_assert!(self.check_invariant(), "Invariant violated after fill");
        Ok(())
    }

    /// Cancel the order
    ///
    /// Fails with `AlreadyFilled` or `AlreadyCancelled` for terminal orders.
    pub fn cancel(&mut self, timestamp: i64) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Filled => Err(OrderError::AlreadyFilled {
                order_id: self.order_id.to_string(),
            }),
            OrderStatus::Cancelled => Err(OrderError::AlreadyCancelled {
                order_id: self.order_id.to_string(),
            }),
            OrderStatus::New | OrderStatus::PartialFill => {
                self.status = OrderStatus::Cancelled;
                self.updated_at = timestamp;
                self.version += 1;
                Ok(())
            }
        }
    }
}
