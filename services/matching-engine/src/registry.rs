//! Symbol registry
//!
//! Routes orders to per-symbol books, creating a book the first time a
//! symbol is seen. Routing is permissive: any valid symbol gets a book on
//! admission. Identity is strict one layer down, where a book rejects an
//! order carrying another symbol.
//!
//! Lock order: the map lock is only ever held to find, create or list
//! books and is always released before a book lock is taken.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::clock::{Clock, SystemClock};
use types::ids::{IdGenerator, OrderId, Symbol, UuidV7Generator};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::config::EngineConfig;
use crate::engine::OrderBook;
use crate::error::EngineError;
use crate::factory::OrderFactory;
use crate::snapshot::{BookSnapshot, DepthSnapshot};

/// Symbol to order book map
pub struct Registry {
    config: EngineConfig,
    factory: OrderFactory,
    clock: Arc<dyn Clock>,
    books: RwLock<HashMap<Symbol, Arc<OrderBook>>>,
}

impl Registry {
    /// Create a registry with UUID v7 ids and the system clock
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_dependencies(config, Arc::new(UuidV7Generator), Arc::new(SystemClock))
    }

    pub fn with_dependencies(
        config: EngineConfig,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        info!(
            max_order_quantity = %config.max_order_quantity,
            min_order_price = %config.min_order_price,
            max_symbols = config.max_symbols,
            "Registry created"
        );

        Ok(Self {
            config,
            factory: OrderFactory::new(ids, Arc::clone(&clock)),
            clock,
            books: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build an order from raw input and submit it
    ///
    /// Returns the order as it stands after admission, with any fills
    /// applied.
    pub fn place_order(
        &self,
        side: Side,
        symbol: &str,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Order, EngineError> {
        let mut order = self.factory.create(side, symbol, price, quantity)?;
        self.submit(&mut order)?;
        Ok(order)
    }

    /// Check admission limits, then admit the order to its symbol's book
    pub fn submit(&self, order: &mut Order) -> Result<(), EngineError> {
        self.check_limits(order)?;

        let book = self.book_or_create(&order.symbol)?;
        debug!(
            symbol = %order.symbol,
            order_id = %order.order_id,
            "Routing order"
        );
        book.admit(order)?;
        Ok(())
    }

    pub fn cancel(&self, symbol: &str, order_id: &OrderId) -> Result<(), EngineError> {
        self.book(symbol)?.cancel(order_id)?;
        Ok(())
    }

    /// Find an order in whichever book holds it
    pub fn get_order(&self, order_id: &OrderId) -> Result<Order, EngineError> {
        // Collect handles first so no book is locked under the map lock
        let books: Vec<Arc<OrderBook>> = self.books.read().values().cloned().collect();

        books
            .iter()
            .find_map(|book| book.get_order(order_id).ok())
            .ok_or_else(|| EngineError::OrderNotFound {
                order_id: order_id.to_string(),
            })
    }

    pub fn get_order_in(&self, symbol: &str, order_id: &OrderId) -> Result<Order, EngineError> {
        Ok(self.book(symbol)?.get_order(order_id)?)
    }

    pub fn get_best_bid(&self, symbol: &str) -> Result<(Price, Quantity), EngineError> {
        Ok(self.book(symbol)?.best_bid()?)
    }

    pub fn get_best_ask(&self, symbol: &str) -> Result<(Price, Quantity), EngineError> {
        Ok(self.book(symbol)?.best_ask()?)
    }

    pub fn get_order_book(&self, symbol: &str) -> Result<BookSnapshot, EngineError> {
        Ok(self.book(symbol)?.snapshot())
    }

    pub fn depth(&self, symbol: &str, levels: usize) -> Result<DepthSnapshot, EngineError> {
        Ok(self.book(symbol)?.depth(levels))
    }

    /// Shared handle to an existing book
    pub fn book(&self, symbol: &str) -> Result<Arc<OrderBook>, EngineError> {
        self.books
            .read()
            .get(symbol)
            .cloned()
            .ok_or_else(|| EngineError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Symbols with a book, sorted
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.books.read().keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn book_count(&self) -> usize {
        self.books.read().len()
    }

    fn check_limits(&self, order: &Order) -> Result<(), EngineError> {
        if order.quantity.as_decimal() > self.config.max_order_quantity {
            warn!(
                symbol = %order.symbol,
                order_id = %order.order_id,
                quantity = %order.quantity,
                "Order rejected: quantity above maximum"
            );
            return Err(EngineError::QuantityAboveMaximum {
                quantity: order.quantity.to_string(),
                maximum: self.config.max_order_quantity.to_string(),
            });
        }

        if order.price.as_decimal() < self.config.min_order_price {
            warn!(
                symbol = %order.symbol,
                order_id = %order.order_id,
                price = %order.price,
                "Order rejected: price below minimum"
            );
            return Err(EngineError::PriceBelowMinimum {
                price: order.price.to_string(),
                minimum: self.config.min_order_price.to_string(),
            });
        }

        Ok(())
    }

    fn book_or_create(&self, symbol: &Symbol) -> Result<Arc<OrderBook>, EngineError> {
        let existing = self.books.read().get(symbol).cloned();
        if let Some(book) = existing {
            return Ok(book);
        }

        let mut books = self.books.write();
        // Another caller may have created it between the two locks
        if let Some(book) = books.get(symbol) {
            return Ok(Arc::clone(book));
        }

        if books.len() >= self.config.max_symbols {
            warn!(
                symbol = %symbol,
                limit = self.config.max_symbols,
                "Order rejected: symbol limit reached"
            );
            return Err(EngineError::SymbolLimitReached {
                limit: self.config.max_symbols,
            });
        }

        let book = Arc::new(OrderBook::with_clock(symbol.clone(), Arc::clone(&self.clock)));
        books.insert(symbol.clone(), Arc::clone(&book));
        info!(symbol = %symbol, books = books.len(), "Order book created");
        Ok(book)
    }
}
