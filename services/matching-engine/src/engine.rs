//! Matching engine core
//!
//! A single-symbol order book: bid and ask level indices, a flat order
//! index, and the price-time priority matching loop. All state sits behind
//! one reader/writer lock: `admit` and `cancel` take it exclusively, every
//! query takes it shared.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};
use types::clock::{Clock, SystemClock};
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderStatus, Side};

use crate::book::{AskBook, BidBook, LevelIndex, PriceLevel};
use crate::error::BookError;
use crate::matching::{crossing, executor};
use crate::snapshot::{BookSnapshot, DepthSnapshot, LevelSnapshot};

/// Order book for a single symbol
pub struct OrderBook {
    symbol: Symbol,
    clock: Arc<dyn Clock>,
    state: RwLock<BookState>,
}

/// Lock-protected book contents
struct BookState {
    bids: BidBook,
    asks: AskBook,
    /// Every order ever admitted; active ones also rest in exactly one level
    orders: HashMap<OrderId, Order>,
}

impl OrderBook {
    /// Create an empty book using the system clock
    pub fn new(symbol: Symbol) -> Self {
        Self::with_clock(symbol, Arc::new(SystemClock))
    }

    pub fn with_clock(symbol: Symbol, clock: Arc<dyn Clock>) -> Self {
        Self {
            symbol,
            clock,
            state: RwLock::new(BookState {
                bids: BidBook::new(),
                asks: AskBook::new(),
                orders: HashMap::new(),
            }),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Admit an order: match it against the opposite side, then rest any
    /// remainder on its own side
    ///
    /// The caller's order is updated in place with the fills it received;
    /// the book keeps its own copy for later queries. Fails with
    /// `InvalidSymbol` (nothing mutated) if the order belongs to another
    /// symbol, or `Internal` if an invariant breach surfaces mid-match.
    pub fn admit(&self, order: &mut Order) -> Result<(), BookError> {
        if order.symbol != self.symbol {
            return Err(BookError::InvalidSymbol {
                expected: self.symbol.to_string(),
                actual: order.symbol.to_string(),
            });
        }

        let timestamp = self.clock.now_nanos();
        let mut guard = self.state.write();
        let state = &mut *guard;

        if state.orders.contains_key(&order.order_id) {
            return Err(BookError::internal(format!(
                "duplicate order id {} admitted to {}",
                order.order_id, self.symbol
            )));
        }

        debug!(
            symbol = %self.symbol,
            order_id = %order.order_id,
            side = %order.side,
            price = %order.price,
            quantity = %order.quantity,
            "Admitting order"
        );

        let BookState { bids, asks, orders } = state;
        let matched = match order.side {
            Side::BUY => drain_crossing(asks, orders, order, timestamp),
            Side::SELL => drain_crossing(bids, orders, order, timestamp),
        };

        // Register even on failure so fills already applied stay queryable
        orders.insert(order.order_id, order.clone());

        if let Err(err) = matched {
            error!(
                symbol = %self.symbol,
                order_id = %order.order_id,
                error = %err,
                "Matching aborted on invariant breach"
            );
            return Err(err);
        }

        if order.is_active() && order.remaining().is_positive() {
            match order.side {
                Side::BUY => bids.insert(order),
                Side::SELL => asks.insert(order),
            }
            debug!(
                symbol = %self.symbol,
                order_id = %order.order_id,
                remaining = %order.remaining(),
                "Order resting"
            );
        }

        Ok(())
    }

    /// Cancel a resting order
    ///
    /// Fails with `OrderNotFound`, `AlreadyFilled` or `AlreadyCancelled`
    /// without mutating anything.
    pub fn cancel(&self, order_id: &OrderId) -> Result<(), BookError> {
        let timestamp = self.clock.now_nanos();
        let mut guard = self.state.write();
        let BookState { bids, asks, orders } = &mut *guard;

        let order = orders.get_mut(order_id).ok_or_else(|| BookError::OrderNotFound {
            order_id: order_id.to_string(),
        })?;

        match order.status {
            OrderStatus::Filled => {
                return Err(BookError::AlreadyFilled {
                    order_id: order_id.to_string(),
                })
            }
            OrderStatus::Cancelled => {
                return Err(BookError::AlreadyCancelled {
                    order_id: order_id.to_string(),
                })
            }
            OrderStatus::New | OrderStatus::PartialFill => {}
        }

        let removed = match order.side {
            Side::BUY => bids.remove(order_id, order.price),
            Side::SELL => asks.remove(order_id, order.price),
        };
        if removed.is_none() {
            error!(
                symbol = %self.symbol,
                order_id = %order_id,
                "Active order missing from its price level"
            );
            return Err(BookError::internal(format!(
                "active order {order_id} not resting at {}",
                order.price
            )));
        }

        order
            .cancel(timestamp)
            .map_err(|err| BookError::internal(err.to_string()))?;

        debug!(
            symbol = %self.symbol,
            order_id = %order_id,
            filled = %order.filled_quantity,
            "Order cancelled"
        );
        Ok(())
    }

    /// Current state of an order, including filled and cancelled ones
    pub fn get_order(&self, order_id: &OrderId) -> Result<Order, BookError> {
        self.state
            .read()
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| BookError::OrderNotFound {
                order_id: order_id.to_string(),
            })
    }

    /// Highest bid price with aggregate remaining quantity
    pub fn best_bid(&self) -> Result<(Price, Quantity), BookError> {
        self.state
            .read()
            .bids
            .best()
            .ok_or(BookError::NoLiquidity { side: Side::BUY })
    }

    /// Lowest ask price with aggregate remaining quantity
    pub fn best_ask(&self) -> Result<(Price, Quantity), BookError> {
        self.state
            .read()
            .asks
            .best()
            .ok_or(BookError::NoLiquidity { side: Side::SELL })
    }

    /// Copy every level with its orders, best price first
    pub fn snapshot(&self) -> BookSnapshot {
        let state = self.state.read();
        BookSnapshot {
            symbol: self.symbol.clone(),
            bids: snapshot_levels(&state.bids, &state.orders),
            asks: snapshot_levels(&state.asks, &state.orders),
        }
    }

    /// Aggregated depth, at most `levels` per side
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        let state = self.state.read();
        DepthSnapshot {
            symbol: self.symbol.clone(),
            bids: state.bids.depth_snapshot(levels),
            asks: state.asks.depth_snapshot(levels),
        }
    }

    /// Number of orders ever admitted
    pub fn order_count(&self) -> usize {
        self.state.read().orders.len()
    }

    /// Number of orders currently resting
    pub fn active_order_count(&self) -> usize {
        self.state
            .read()
            .orders
            .values()
            .filter(|order| order.is_active())
            .count()
    }

    /// (bid levels, ask levels)
    pub fn level_counts(&self) -> (usize, usize) {
        let state = self.state.read();
        (state.bids.level_count(), state.asks.level_count())
    }

    /// Verify the book's structural invariants
    ///
    /// Checks that the book is not crossed, no level is empty, level
    /// entries agree with the indexed orders, and that exactly the active
    /// orders rest in the levels.
    pub fn check_invariants(&self) -> bool {
        let state = self.state.read();

        if crossing::is_crossed(state.bids.best_price(), state.asks.best_price()) {
            return false;
        }

        let mut resting = 0usize;
        let sides: [&dyn LevelIndex; 2] = [&state.bids, &state.asks];
        for index in sides {
            for (price, level) in index.levels_best_first() {
                if level.is_empty() {
                    return false;
                }
                let total: Quantity = level.entries().map(|e| e.remaining_quantity).sum();
                if total != level.total_quantity() {
                    return false;
                }
                for entry in level.entries() {
                    let Some(order) = state.orders.get(&entry.order_id) else {
                        return false;
                    };
                    if order.side != index.side()
                        || order.price != price
                        || !order.is_active()
                        || order.remaining() != entry.remaining_quantity
                        || !order.check_invariant()
                    {
                        return false;
                    }
                    resting += 1;
                }
            }
        }

        let active = state.orders.values().filter(|o| o.is_active()).count();
        resting == active && state.orders.values().all(|o| o.check_invariant())
    }
}

/// Match `incoming` against `opposite` until it is filled or no longer
/// crosses the best level
///
/// Resting orders are consumed strictly head-first at each level, and a
/// level is pruned in the same step that empties it.
fn drain_crossing<L: LevelIndex>(
    opposite: &mut L,
    orders: &mut HashMap<OrderId, Order>,
    incoming: &mut Order,
    timestamp: i64,
) -> Result<(), BookError> {
    while incoming.remaining().is_positive() && incoming.status != OrderStatus::Cancelled {
        let Some((level_price, resting_id, entry_remaining)) = opposite.peek_best_front() else {
            break;
        };

        if !crossing::incoming_can_match(incoming.side, incoming.price, level_price) {
            break;
        }

        let resting = orders.get_mut(&resting_id).ok_or_else(|| {
            BookError::internal(format!("resting order {resting_id} missing from index"))
        })?;
        if resting.remaining() != entry_remaining {
            return Err(BookError::internal(format!(
                "level entry for {resting_id} shows {entry_remaining}, order has {}",
                resting.remaining()
            )));
        }

        let quantity = executor::match_quantity(incoming, resting);
        let execution =
            executor::execute_match(incoming, resting, level_price, quantity, timestamp)
                .map_err(|err| BookError::internal(err.to_string()))?;

        opposite.fill_best_front(quantity).ok_or_else(|| {
            BookError::internal(format!("level at {level_price} rejected fill of {quantity}"))
        })?;

        debug!(
            maker_order_id = %execution.maker_order_id,
            taker_order_id = %execution.taker_order_id,
            price = %execution.price,
            quantity = %execution.quantity,
            "Execution"
        );
    }

    Ok(())
}

fn snapshot_levels<L: LevelIndex>(index: &L, orders: &HashMap<OrderId, Order>) -> Vec<LevelSnapshot> {
    index
        .levels_best_first()
        .map(|(price, level)| snapshot_level(price, level, orders))
        .collect()
}

fn snapshot_level(price: Price, level: &PriceLevel, orders: &HashMap<OrderId, Order>) -> LevelSnapshot {
    LevelSnapshot {
        price,
        quantity: level.total_quantity(),
        orders: level
            .entries()
            .filter_map(|entry| orders.get(&entry.order_id).cloned())
            .collect(),
    }
}
