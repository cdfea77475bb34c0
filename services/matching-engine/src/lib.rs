//! Matching Engine
//!
//! Price-time priority limit order matching for any number of symbols.
//!
//! Each `OrderBook` owns one symbol's bid and ask levels behind a single
//! reader/writer lock. The `Registry` maps symbols to books, creates them
//! on first use and applies configured admission limits.
//!
//! **Key Invariants:**
//! - Best price first, then strict arrival order within a price
//! - Executions happen at the resting order's price
//! - Conservation of quantity (buy fills equal sell fills)
//! - The book is never left crossed once an operation returns

pub mod book;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod matching;
pub mod registry;
pub mod snapshot;

pub use config::EngineConfig;
pub use engine::OrderBook;
pub use error::{BookError, EngineError, ErrorKind};
pub use factory::OrderFactory;
pub use matching::Execution;
pub use registry::Registry;
pub use snapshot::{BookSnapshot, DepthSnapshot, LevelSnapshot};
