//! Order construction from raw input

use rust_decimal::Decimal;
use std::sync::Arc;
use types::clock::Clock;
use types::errors::OrderError;
use types::ids::IdGenerator;
use types::order::{Order, Side};

/// Builds validated orders with injected ids and timestamps
#[derive(Clone)]
pub struct OrderFactory {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl OrderFactory {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Validate `(side, symbol, price, quantity)` and stamp a fresh id
    pub fn create(
        &self,
        side: Side,
        symbol: &str,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Order, OrderError> {
        Order::create(
            self.ids.as_ref(),
            side,
            symbol,
            price,
            quantity,
            self.clock.now_nanos(),
        )
    }
}
