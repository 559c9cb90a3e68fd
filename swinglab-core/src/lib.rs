//! SwingLab Core — strategy simulation engine.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (bars, positions, trade events, the append-only ledger)
//! - Indicator library (ATR, SMA, RMA, ADX, Choppiness, Donchian bands)
//! - Two strategy state machines behind one `Strategy` trait:
//!   breakout-with-reversal and long-only trend-following
//! - The bar-by-bar engine loop with input validation
//!
//! A full backtest is one synchronous call: bars + parameters in, trade
//! ledger + summary out. No I/O, no shared state across runs.

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod strategy;

pub use domain::{Bar, Direction, Position, TradeAction, TradeEvent, TradeLedger};
pub use engine::{run_strategy, EngineError, RunOutput};
pub use strategy::{BreakoutParams, StrategyError, StrategySpec, TrendParams};
