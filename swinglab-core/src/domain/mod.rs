//! Domain types for the simulation engine.

pub mod bar;
pub mod ledger;
pub mod position;
pub mod trade;

pub use bar::Bar;
pub use ledger::TradeLedger;
pub use position::{Direction, Position};
pub use trade::{TradeAction, TradeEvent};
