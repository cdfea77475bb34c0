//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::{FrontFill, PriceLevel};
use super::LevelIndex;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct BidBook {
    /// Price levels keyed ascending; the best bid is the last key
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev() // Reverse to get highest prices first
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }
}

impl LevelIndex for BidBook {
    fn side(&self) -> Side {
        Side::BUY
    }

    fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.price).or_default();
        level.insert(order.order_id, order.remaining());
    }

    fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Quantity> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id)?;
        // Remove empty price levels to keep book clean
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    fn best(&self) -> Option<(Price, Quantity)> {
        // BTreeMap iter is ascending, so we need last()
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    fn peek_best_front(&self) -> Option<(Price, OrderId, Quantity)> {
        let (price, level) = self.levels.iter().next_back()?;
        let (order_id, remaining) = level.peek_front()?;
        Some((*price, order_id, remaining))
    }

    fn fill_best_front(&mut self, quantity: Quantity) -> Option<FrontFill> {
        let mut entry = self.levels.last_entry()?;
        let fill = entry.get_mut().fill_front(quantity)?;
        if entry.get().is_empty() {
            entry.remove();
        }
        Some(fill)
    }

    fn levels_best_first(&self) -> Box<dyn Iterator<Item = (Price, &PriceLevel)> + '_> {
        Box::new(self.levels.iter().rev().map(|(price, level)| (*price, level)))
    }

    fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl Default for BidBook {
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
            Side::BUY,
            Symbol::try_new("BTC-USD").unwrap(),
            Price::from_u64(price_val),
            qty(qty_str),
            1708123456789000000,
        )
        .unwrap()
    }

    #[test]
    fn test_bid_book_insert() {
        let mut book = BidBook::new();
        book.insert(&create_test_order(50000, "1.5"));

        assert_eq!(book.level_count(), 1);
        assert!(!book.is_empty());
        assert_eq!(book.side(), Side::BUY);
    }

    #[test]
    fn test_bid_book_best_bid() {
        let mut book = BidBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(51000, "2.0")); // Higher price
        book.insert(&create_test_order(49000, "1.5")); // Lower price

        let (best_price, best_qty) = book.best().unwrap();
        assert_eq!(best_price, Price::from_u64(51000)); // Highest price
        assert_eq!(best_qty, qty("2.0"));
        assert_eq!(book.best_price(), Some(Price::from_u64(51000)));
    }

    #[test]
    fn test_bid_book_remove_prunes_level() {
        let mut book = BidBook::new();
        let order = create_test_order(50000, "1.0");

        book.insert(&order);
        assert_eq!(book.level_count(), 1);

        let removed = book.remove(&order.order_id, order.price);
        assert_eq!(removed, Some(qty("1.0")));
        assert!(book.is_empty());

        assert_eq!(book.remove(&order.order_id, order.price), None);
    }

    #[test]
    fn test_bid_book_fill_best_front() {
        let mut book = BidBook::new();
        let first = create_test_order(51000, "1.0");
        let second = create_test_order(51000, "1.0");
        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&first);
        book.insert(&second);

        let (price, order_id, _) = book.peek_best_front().unwrap();
        assert_eq!(price, Price::from_u64(51000));
        assert_eq!(order_id, first.order_id);

        assert!(book.fill_best_front(qty("1.0")).unwrap().exhausted);
        assert!(book.fill_best_front(qty("1.0")).unwrap().exhausted);

        // 51000 pruned, 50000 is now best
        assert_eq!(book.best_price(), Some(Price::from_u64(50000)));
        assert_eq!(book.level_count(), 1);
    }

    #[test]
    fn test_bid_book_depth_snapshot() {
        let mut book = BidBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(51000, "2.0"));
        book.insert(&create_test_order(49000, "1.5"));
        book.insert(&create_test_order(52000, "0.5"));

        let depth = book.depth_snapshot(2);

        // Should return top 2 levels (highest prices first)
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0].0, Price::from_u64(52000));
        assert_eq!(depth[1].0, Price::from_u64(51000));

        let prices: Vec<_> = book.levels_best_first().map(|(p, _)| p).collect();
        assert_eq!(
            prices,
            vec![
                Price::from_u64(52000),
                Price::from_u64(51000),
                Price::from_u64(50000),
                Price::from_u64(49000),
            ]
        );
    }

    #[test]
    fn test_bid_book_price_time_priority() {
        let mut book = BidBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(50000, "2.0")); // Same price

        // Both orders at same price level
        assert_eq!(book.level_count(), 1);

        let (price, total_qty) = book.best().unwrap();
        assert_eq!(price, Price::from_u64(50000));
        assert_eq!(total_qty, qty("3.0")); // 1.0 + 2.0
    }
}
