//! SwingLab Runner — backtest orchestration on top of `swinglab-core`.
//!
//! This crate provides:
//! - Serializable `BacktestConfig` (TOML) with a content-hash RunId
//! - CSV bar ingestion
//! - Single-backtest runner (config → engine → metrics)
//! - The performance calculator
//! - Trade-tape export (CSV/JSON)

pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod runner;

pub use config::{BacktestConfig, ConfigError, RunId};
pub use data_loader::{load_bars, LoadError};
pub use export::{write_trades_csv, write_trades_json, ExportError};
pub use metrics::PerformanceMetrics;
pub use runner::{run_backtest_from_csv, run_single_backtest, BacktestResult, RunError};
