//! Order book infrastructure module
//!
//! Contains price levels, bid book, and ask book implementations, plus the
//! `LevelIndex` trait the matching loop drives without caring which side
//! it is draining.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::{FrontFill, OrderEntry, PriceLevel};

use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// One side of the book: price levels ordered best price first
///
/// A level present in the index is never empty; every operation that
/// empties a level prunes it before returning.
pub trait LevelIndex {
    /// Which side this index holds
    fn side(&self) -> Side;

    /// Append an order's remaining quantity at the tail of its price level
    fn insert(&mut self, order: &Order);

    /// Remove an order from the level at `price`
    ///
    /// Returns the removed entry's remaining quantity, or None if absent.
    fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Quantity>;

    /// Best price with aggregate remaining quantity
    fn best(&self) -> Option<(Price, Quantity)>;

    fn best_price(&self) -> Option<Price>;

    /// Oldest order at the best price: (level price, order_id, remaining)
    fn peek_best_front(&self) -> Option<(Price, OrderId, Quantity)>;

    /// Fill the oldest order at the best price
    fn fill_best_front(&mut self, quantity: Quantity) -> Option<FrontFill>;

    /// Levels from best to worst
    fn levels_best_first(&self) -> Box<dyn Iterator<Item = (Price, &PriceLevel)> + '_>;

    fn is_empty(&self) -> bool;

    fn level_count(&self) -> usize;
}
