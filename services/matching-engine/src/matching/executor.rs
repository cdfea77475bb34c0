//! Trade execution logic
//!
//! Applies one match between an incoming (taker) order and a resting
//! (maker) order. Both orders are checked before either is mutated, so a
//! rejected match leaves both untouched.

use serde::Serialize;
use types::errors::OrderError;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Record of a single match between two orders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    /// Taker side
    pub side: Side,
    /// Execution price (maker's level price)
    pub price: Price,
    pub quantity: Quantity,
    pub executed_at: i64,
}

/// Fill `quantity` on both the taker and the maker
///
/// Returns `Overfill`, `AlreadyCancelled` or `InvalidFill` from whichever
/// order cannot take the fill. The matching loop sizes `quantity` as the
/// smaller remaining amount, so any error here means the book is corrupt.
pub fn execute_match(
    taker: &mut Order,
    maker: &mut Order,
    price: Price,
    quantity: Quantity,
    timestamp: i64,
) -> Result<Execution, OrderError> {
    taker.can_fill(quantity)?;
    maker.can_fill(quantity)?;

    taker.fill(quantity, timestamp)?;
    maker.fill(quantity, timestamp)?;

    Ok(Execution {
        maker_order_id: maker.order_id,
        taker_order_id: taker.order_id,
        side: taker.side,
        price,
        quantity,
        executed_at: timestamp,
    })
}

/// Quantity to match: the smaller of the two remaining amounts
pub fn match_quantity(taker: &Order, maker: &Order) -> Quantity {
    taker.remaining().min(maker.remaining())
}
