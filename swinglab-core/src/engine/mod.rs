//! Backtesting engine — bar validation plus the per-bar loop.
//!
//! One call, one run: the engine filters invalid bars (collecting warnings),
//! enforces the ascending-date input contract, then drives the strategy's
//! per-bar decision function over shared account state. No I/O, no
//! randomness, no state survives the call.

pub mod state;

pub use state::AccountState;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bar, Position, TradeEvent, TradeLedger};
use crate::strategy::{ParamError, StrategySpec};

/// Failures that abort a run before any bar is processed.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("initial capital must be positive and finite, got {0}")]
    InvalidCapital(f64),
    #[error("bar sequence not strictly ascending by date at index {index}: {prev} then {next}")]
    UnsortedBars {
        index: usize,
        prev: chrono::NaiveDate,
        next: chrono::NaiveDate,
    },
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),
}

/// Plain-data result of one run, consumable by any presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    /// Every execution, in chronological order. Reversing for display is a
    /// presentation concern.
    pub trades: Vec<TradeEvent>,
    /// Valid bars actually processed.
    pub historical_data_count: usize,
    pub final_equity: f64,
    /// Still-open position at end of data, if any. The engine does not
    /// synthesize a final close.
    pub open_position: Option<Position>,
    /// Bars before the strategy's indicators can all be ready.
    pub warmup_bars: usize,
    /// One line per dropped invalid bar.
    pub data_quality_warnings: Vec<String>,
}

/// Drop void/insane bars, one warning each.
fn filter_bars(bars: &[Bar]) -> (Vec<Bar>, Vec<String>) {
    let mut valid = Vec::with_capacity(bars.len());
    let mut warnings = Vec::new();
    for (i, bar) in bars.iter().enumerate() {
        if bar.is_sane() {
            valid.push(bar.clone());
        } else {
            warnings.push(format!(
                "dropped invalid bar at index {i} ({}): o={} h={} l={} c={}",
                bar.date, bar.open, bar.high, bar.low, bar.close
            ));
        }
    }
    (valid, warnings)
}

/// Check strict date ascension over the surviving bars.
fn check_ascending(bars: &[Bar]) -> Result<(), EngineError> {
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(EngineError::UnsortedBars {
                index: i + 1,
                prev: pair[0].date,
                next: pair[1].date,
            });
        }
    }
    Ok(())
}

/// Run one strategy over one bar series.
///
/// Deterministic: identical inputs produce identical outputs, trade for
/// trade. An empty (or fully invalid) series yields an empty result rather
/// than an error — there is simply nothing to process.
pub fn run_strategy(
    spec: &StrategySpec,
    bars: &[Bar],
    initial_capital: f64,
) -> Result<RunOutput, EngineError> {
    if !(initial_capital.is_finite() && initial_capital > 0.0) {
        return Err(EngineError::InvalidCapital(initial_capital));
    }
    spec.validate()?;

    let (bars, data_quality_warnings) = filter_bars(bars);
    check_ascending(&bars)?;

    let mut strategy = spec.build();
    let mut account = AccountState::new(initial_capital);
    let mut ledger = TradeLedger::new();

    for i in 0..bars.len() {
        strategy.on_bar(&bars, i, &mut account, &mut ledger);
        debug_assert!(
            ledger.pairing_holds(account.position.is_some()),
            "entry/exit pairing violated at bar {i}"
        );
    }

    Ok(RunOutput {
        trades: ledger.into_events(),
        historical_data_count: bars.len(),
        final_equity: account.equity,
        open_position: account.position,
        warmup_bars: strategy.warmup_bars(),
        data_quality_warnings,
    })
}
