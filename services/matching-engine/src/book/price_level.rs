//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at a specific price point.
//! Orders are maintained in FIFO (First-In-First-Out) order to enforce
//! time priority: the front entry is always the longest-resting order.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Quantity;

/// A price level containing orders at a specific price
///
/// Entries reference orders by id; the order values themselves live in the
/// book's order index. Each entry mirrors its order's remaining quantity so
/// the level can report aggregate size without touching the index.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<OrderEntry>,
    /// Total remaining quantity at this level
    total_quantity: Quantity,
}

/// Entry in the price level queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub order_id: OrderId,
    pub remaining_quantity: Quantity,
}

/// Outcome of filling the front entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontFill {
    pub order_id: OrderId,
    pub remaining_quantity: Quantity,
    /// The entry reached zero and was popped
    pub exhausted: bool,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn insert(&mut self, order_id: OrderId, quantity: Quantity) {
        self.orders.push_back(OrderEntry {
            order_id,
            remaining_quantity: quantity,
        });
        self.total_quantity = self.total_quantity + quantity;
    }

    /// Remove an order from the queue by OrderId
    ///
    /// Returns the remaining quantity of the removed order, or None if not found
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Quantity> {
        let position = self.orders.iter().position(|entry| &entry.order_id == order_id)?;
        let entry = self.orders.remove(position)?;

        self.total_quantity = self
            .total_quantity
            .checked_sub(entry.remaining_quantity)
            .unwrap_or(Quantity::zero());

        Some(entry.remaining_quantity)
    }

    /// Peek at the front order without removing it
    ///
    /// Returns (order_id, remaining quantity)
    pub fn peek_front(&self) -> Option<(OrderId, Quantity)> {
        self.orders
            .front()
            .map(|entry| (entry.order_id, entry.remaining_quantity))
    }

    /// Reduce the front order by `quantity`, popping it once it reaches zero
    ///
    /// Returns None if the level is empty or `quantity` exceeds the front
    /// entry; the level is unchanged in that case.
    pub fn fill_front(&mut self, quantity: Quantity) -> Option<FrontFill> {
        let entry = self.orders.front_mut()?;
        let remaining = entry.remaining_quantity.checked_sub(quantity)?;
        let order_id = entry.order_id;

        entry.remaining_quantity = remaining;
        if remaining.is_zero() {
            self.orders.pop_front();
        }

        self.total_quantity = self
            .total_quantity
            .checked_sub(quantity)
            .unwrap_or(Quantity::zero());

        Some(FrontFill {
            order_id,
            remaining_quantity: remaining,
            exhausted: remaining.is_zero(),
        })
    }

    /// Entries in arrival order
    pub fn entries(&self) -> impl Iterator<Item = &OrderEntry> + '_ {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    #[test]
    fn test_price_level_insert() {
        let mut level = PriceLevel::new();
        let order_id = OrderId::new();

        level.insert(order_id, qty("1.5"));

        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), qty("1.5"));
        assert!(!level.is_empty());
    }

    #[test]
    fn test_price_level_fifo_order() {
        let mut level = PriceLevel::new();
        let order1 = OrderId::new();
        let order2 = OrderId::new();
        let order3 = OrderId::new();

        level.insert(order1, qty("1.0"));
        level.insert(order2, qty("2.0"));
        level.insert(order3, qty("3.0"));

        // First order should be at front
        let (front_id, front_qty) = level.peek_front().unwrap();
        assert_eq!(front_id, order1);
        assert_eq!(front_qty, qty("1.0"));

        let ids: Vec<_> = level.entries().map(|e| e.order_id).collect();
        assert_eq!(ids, vec![order1, order2, order3]);
    }

    #[test]
    fn test_price_level_remove_by_identity() {
        let mut level = PriceLevel::new();
        let order1 = OrderId::new();
        let order2 = OrderId::new();
        let order3 = OrderId::new();

        level.insert(order1, qty("1.0"));
        level.insert(order2, qty("2.0"));
        level.insert(order3, qty("3.0"));

        // Remove middle order
        assert_eq!(level.remove(&order2), Some(qty("2.0")));
        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_quantity(), qty("4.0"));
        assert_eq!(level.remove(&order2), None);

        let ids: Vec<_> = level.entries().map(|e| e.order_id).collect();
        assert_eq!(ids, vec![order1, order3]);
    }

    #[test]
    fn test_fill_front_partial_then_exhaust() {
        let mut level = PriceLevel::new();
        let order1 = OrderId::new();
        let order2 = OrderId::new();

        level.insert(order1, qty("5.0"));
        level.insert(order2, qty("1.0"));

        let fill = level.fill_front(qty("3.0")).unwrap();
        assert_eq!(fill.order_id, order1);
        assert_eq!(fill.remaining_quantity, qty("2.0"));
        assert!(!fill.exhausted);
        assert_eq!(level.total_quantity(), qty("3.0"));
        assert_eq!(level.order_count(), 2);

        let fill = level.fill_front(qty("2.0")).unwrap();
        assert!(fill.exhausted);
        assert_eq!(level.peek_front().map(|(id, _)| id), Some(order2));
        assert_eq!(level.total_quantity(), qty("1.0"));
    }

    #[test]
    fn test_fill_front_rejects_overfill() {
        let mut level = PriceLevel::new();
        let order_id = OrderId::new();
        level.insert(order_id, qty("1.0"));

        assert_eq!(level.fill_front(qty("1.5")), None);
        assert_eq!(level.peek_front(), Some((order_id, qty("1.0"))));
        assert_eq!(level.total_quantity(), qty("1.0"));

        assert_eq!(PriceLevel::new().fill_front(qty("1.0")), None);
    }

    #[test]
    fn test_price_level_total_quantity_invariant() {
        let mut level = PriceLevel::new();

        level.insert(OrderId::new(), qty("1.5"));
        level.insert(OrderId::new(), qty("2.5"));
        level.insert(OrderId::new(), qty("3.0"));

        // Total should be sum of all quantities
        let sum: Quantity = level.entries().map(|e| e.remaining_quantity).sum();
        assert_eq!(level.total_quantity(), sum);
        assert_eq!(level.total_quantity(), qty("7.0"));
    }
}
