//! Read-only copies of book state
//!
//! Snapshots are taken under the book's read lock and own their data, so
//! they stay valid after the lock is released.

use serde::Serialize;
use types::ids::Symbol;
use types::numeric::{Price, Quantity};
use types::order::Order;

/// One price level with its resting orders in arrival order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSnapshot {
    pub price: Price,
    /// Aggregate remaining quantity at this price
    pub quantity: Quantity,
    pub orders: Vec<Order>,
}

/// Full book copy, best price first on both sides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSnapshot {
    pub symbol: Symbol,
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.first().map(|level| (level.price, level.quantity))
    }

    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.first().map(|level| (level.price, level.quantity))
    }
}

/// Aggregated depth for market data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthSnapshot {
    pub symbol: Symbol,
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}
