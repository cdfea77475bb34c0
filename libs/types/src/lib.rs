//! Types library for the limit order matching engine
//!
//! This library provides the core type definitions shared by the matching
//! engine and any transport built on top of it, keeping price handling
//! deterministic and order state transitions explicit.
//!
//! # Modules
//! - `ids`: Order identifiers, symbols and the injected id source
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `clock`: Injected time source
//! - `order`: Order entity and lifecycle state machine
//! - `errors`: Error taxonomy

// Public modules
pub mod clock;
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::*;
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
}
