//! Strategy abstraction — one trait, two concrete variants.
//!
//! A strategy is a per-bar decision function with private state (pending
//! signal, trailing peak). It reads the bar series and indicators, and acts
//! on the shared [`AccountState`] (equity + the single open position),
//! recording every execution in the [`TradeLedger`]. The engine owns the
//! loop; strategies never see anything beyond the current index.

pub mod breakout;
pub mod trend;

use crate::domain::{Bar, TradeLedger};
use crate::engine::AccountState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use breakout::{BreakoutParams, BreakoutReversal};
pub use trend::{TrendFollowing, TrendParams};

/// Per-bar decision function over shared account state.
pub trait Strategy {
    /// Identifier used in configs and error messages.
    fn name(&self) -> &'static str;

    /// Bars before the first index at which every indicator this strategy
    /// consults can be ready. Reported on the run output; readiness is
    /// still re-checked per bar through the indicators' `Option` returns.
    fn warmup_bars(&self) -> usize;

    /// Process bar `i`. `bars` is the validated, ascending series.
    fn on_bar(
        &mut self,
        bars: &[Bar],
        i: usize,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    );
}

/// Tagged strategy selection: variant + its parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum StrategySpec {
    Breakout(BreakoutParams),
    TrendFollowing(TrendParams),
}

impl StrategySpec {
    pub fn name(&self) -> &'static str {
        match self {
            StrategySpec::Breakout(_) => "breakout",
            StrategySpec::TrendFollowing(_) => "trend_following",
        }
    }

    /// Instantiate the strategy for one run.
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategySpec::Breakout(params) => Box::new(BreakoutReversal::new(params.clone())),
            StrategySpec::TrendFollowing(params) => {
                Box::new(TrendFollowing::new(params.clone()))
            }
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            StrategySpec::Breakout(params) => params.validate(),
            StrategySpec::TrendFollowing(params) => params.validate(),
        }
    }

    /// Build a spec with default parameters from a strategy name.
    ///
    /// Unknown names fail fast — there is no default strategy to fall
    /// through to.
    pub fn from_name(name: &str) -> Result<Self, StrategyError> {
        match name {
            "breakout" => Ok(StrategySpec::Breakout(BreakoutParams::default())),
            "trend_following" => Ok(StrategySpec::TrendFollowing(TrendParams::default())),
            other => Err(StrategyError::NotImplemented(other.to_string())),
        }
    }
}

/// Strategy selection failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("strategy not implemented: '{0}' (valid: breakout, trend_following)")]
    NotImplemented(String),
}

/// Parameter validation failure.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("{0} must be at least {1}")]
    PeriodTooSmall(&'static str, usize),
    #[error("{0} must be positive and finite, got {1}")]
    NonPositive(&'static str, f64),
    #[error("{0} must be finite, got {1}")]
    NonFinite(&'static str, f64),
    #[error("allocation must be within (0, 1], got {0}")]
    BadAllocation(f64),
}

pub(crate) fn check_period(
    name: &'static str,
    value: usize,
    min: usize,
) -> Result<(), ParamError> {
    if value < min {
        return Err(ParamError::PeriodTooSmall(name, min));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ParamError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ParamError::NonPositive(name, value));
    }
    Ok(())
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NonFinite(name, value));
    }
    Ok(())
}

pub(crate) fn check_allocation(value: f64) -> Result<(), ParamError> {
    if !(value.is_finite() && value > 0.0 && value <= 1.0) {
        return Err(ParamError::BadAllocation(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_known() {
        assert_eq!(
            StrategySpec::from_name("breakout").unwrap().name(),
            "breakout"
        );
        assert_eq!(
            StrategySpec::from_name("trend_following").unwrap().name(),
            "trend_following"
        );
    }

    #[test]
    fn from_name_unknown_fails_fast() {
        let err = StrategySpec::from_name("martingale").unwrap_err();
        assert_eq!(err, StrategyError::NotImplemented("martingale".into()));
        assert!(err.to_string().contains("strategy not implemented"));
    }

    #[test]
    fn spec_serde_roundtrip() {
        let spec = StrategySpec::Breakout(BreakoutParams::default());
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"type\":\"breakout\""));
        let deser: StrategySpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, deser);
    }

    #[test]
    fn default_specs_validate() {
        StrategySpec::from_name("breakout").unwrap().validate().unwrap();
        StrategySpec::from_name("trend_following")
            .unwrap()
            .validate()
            .unwrap();
    }
}
