//! Registry configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::EngineError;

/// Admission limits applied by the registry before an order reaches a book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest quantity accepted for a single order
    pub max_order_quantity: Decimal,
    /// Smallest limit price accepted
    pub min_order_price: Decimal,
    /// Maximum number of books the registry will create
    pub max_symbols: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_order_quantity: Decimal::from(1000),
            min_order_price: Decimal::new(1, 8),
            max_symbols: 100,
        }
    }
}

impl EngineConfig {
    /// Reject non-positive limits
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_order_quantity <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                reason: format!("max_order_quantity must be positive, got {}", self.max_order_quantity),
            });
        }
        if self.min_order_price <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                reason: format!("min_order_price must be positive, got {}", self.min_order_price),
            });
        }
        if self.max_symbols == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "max_symbols must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
