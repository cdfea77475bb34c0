//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::{FrontFill, PriceLevel};
use super::LevelIndex;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }
}

impl LevelIndex for AskBook {
    fn side(&self) -> Side {
        Side::SELL
    }

    fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.price).or_default();
        level.insert(order.order_id, order.remaining());
    }

    fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Quantity> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    fn best(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    fn peek_best_front(&self) -> Option<(Price, OrderId, Quantity)> {
        let (price, level) = self.levels.iter().next()?;
        let (order_id, remaining) = level.peek_front()?;
        Some((*price, order_id, remaining))
    }

    fn fill_best_front(&mut self, quantity: Quantity) -> Option<FrontFill> {
        let mut entry = self.levels.first_entry()?;
        let fill = entry.get_mut().fill_front(quantity)?;
        if entry.get().is_empty() {
            entry.remove();
        }
        Some(fill)
    }

    fn levels_best_first(&self) -> Box<dyn Iterator<Item = (Price, &PriceLevel)> + '_> {
        Box::new(self.levels.iter().map(|(price, level)| (*price, level)))
    }

    fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl Default for AskBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::Symbol;

    fn qty(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn create_test_order(price_val: u64, qty_str: &str) -> Order {
        Order::new(
            OrderId::new(),
            Side::SELL,
            Symbol::try_new("BTC-USD").unwrap(),
            Price::from_u64(price_val),
            qty(qty_str),
            1708123456789000000,
        )
        .unwrap()
    }

    #[test]
    fn test_ask_book_best_ask() {
        let mut book = AskBook::new();

        book.insert(&create_test_order(51000, "1.0"));
        book.insert(&create_test_order(50000, "2.0")); // Lower price
        book.insert(&create_test_order(52000, "1.5"));

        let (best_price, best_qty) = book.best().unwrap();
        assert_eq!(best_price, Price::from_u64(50000)); // Lowest price
        assert_eq!(best_qty, qty("2.0"));
    }

    #[test]
    fn test_ask_book_remove_keeps_other_orders() {
        let mut book = AskBook::new();
        let first = create_test_order(50000, "1.0");
        let second = create_test_order(50000, "3.0");

        book.insert(&first);
        book.insert(&second);

        assert_eq!(book.remove(&first.order_id, first.price), Some(qty("1.0")));
        assert_eq!(book.level_count(), 1);
        assert_eq!(book.best(), Some((Price::from_u64(50000), qty("3.0"))));

        // Wrong price finds nothing
        assert_eq!(book.remove(&second.order_id, Price::from_u64(50001)), None);
    }

    #[test]
    fn test_ask_book_partial_fill_keeps_front() {
        let mut book = AskBook::new();
        let order = create_test_order(50000, "2.0");
        book.insert(&order);

        let fill = book.fill_best_front(qty("0.5")).unwrap();
        assert_eq!(fill.order_id, order.order_id);
        assert!(!fill.exhausted);
        assert_eq!(book.peek_best_front(), Some((order.price, order.order_id, qty("1.5"))));

        assert!(book.fill_best_front(qty("2.0")).is_none());
        assert!(book.fill_best_front(qty("1.5")).unwrap().exhausted);
        assert!(book.is_empty());
    }

    #[test]
    fn test_ask_book_depth_snapshot() {
        let mut book = AskBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(51000, "2.0"));
        book.insert(&create_test_order(49000, "1.5"));

        let depth = book.depth_snapshot(2);

        // Lowest prices first
        assert_eq!(
            depth,
            vec![
                (Price::from_u64(49000), qty("1.5")),
                (Price::from_u64(50000), qty("1.0")),
            ]
        );
    }
}
