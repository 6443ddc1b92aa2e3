//! Canonical domain types for StockDrop price data.
//!
//! All models validate their invariants at construction time: a `Quote`
//! with a negative price or with disagreeing change/change-percent signs
//! cannot exist, and a `HistoricalSeries` always holds strictly ascending
//! dates. Values are immutable after construction.

mod date;
mod models;
mod symbol;
mod timestamp;

pub use date::TradingDate;
pub use models::{HistoricalSeries, PricePoint, Quote};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
