//! Backtest runner — wires together config, engine, and metrics.
//!
//! Two entry points:
//! - `run_single_backtest()`: pre-loaded bars + config. Used by tests and
//!   embedding callers.
//! - `run_backtest_from_csv()`: loads bars from a CSV file first. Used by
//!   the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use swinglab_core::domain::Bar;
use swinglab_core::engine::{run_strategy, EngineError, RunOutput};
use swinglab_core::strategy::StrategySpec;

use crate::config::{BacktestConfig, ConfigError, RunId};
use crate::data_loader::{load_bars, LoadError};
use crate::metrics::PerformanceMetrics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Complete result of a single backtest run: the raw simulation output plus
/// the derived statistics, stamped with the config hash that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub run_id: RunId,
    pub strategy: StrategySpec,
    pub initial_capital: f64,
    pub output: RunOutput,
    pub metrics: PerformanceMetrics,
}

/// Run one backtest over pre-loaded bars.
pub fn run_single_backtest(
    config: &BacktestConfig,
    bars: &[Bar],
) -> Result<BacktestResult, RunError> {
    let spec = config.strategy_spec()?;
    let initial_capital = config.backtest.initial_capital;
    let output = run_strategy(&spec, bars, initial_capital)?;
    let metrics = PerformanceMetrics::compute(&output.trades, initial_capital);
    Ok(BacktestResult {
        run_id: config.run_id(),
        strategy: spec,
        initial_capital,
        output,
        metrics,
    })
}

/// Load bars from a CSV file, then run.
pub fn run_backtest_from_csv(
    config: &BacktestConfig,
    data_path: &Path,
) -> Result<BacktestResult, RunError> {
    let bars = load_bars(data_path)?;
    run_single_backtest(config, &bars)
}
