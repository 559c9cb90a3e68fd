//! Serializable backtest configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use swinglab_core::strategy::{BreakoutParams, StrategyError, StrategySpec, TrendParams};
use thiserror::Error;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Configuration for a single backtest run, loadable from TOML:
///
/// ```toml
/// [backtest]
/// initial_capital = 100000.0
///
/// [strategy]
/// type = "breakout"
///
/// [strategy.params]
/// lookback_period = 20
/// range_mult = 0.5
/// ```
///
/// Omitted params fall back to the strategy's defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    pub backtest: BacktestSettings,
    pub strategy: StrategySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestSettings {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
}

fn default_initial_capital() -> f64 {
    100_000.0
}

/// Raw strategy section: tag + untyped params table.
///
/// The tag is matched explicitly in [`BacktestConfig::strategy_spec`] so an
/// unknown name fails with "strategy not implemented" instead of falling
/// through to some default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategySettings {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<toml::Value>,
}

/// Errors from loading or interpreting a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(toml::de::Error),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    #[error("invalid params for strategy '{kind}': {source}")]
    Params {
        kind: String,
        source: toml::de::Error,
    },
}

impl BacktestConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Build a config with a named strategy and its default parameters.
    pub fn with_defaults(strategy: &str, initial_capital: f64) -> Result<Self, ConfigError> {
        // Validates the name up front; the params table stays empty.
        StrategySpec::from_name(strategy)?;
        Ok(Self {
            backtest: BacktestSettings { initial_capital },
            strategy: StrategySettings {
                kind: strategy.to_string(),
                params: None,
            },
        })
    }

    /// Resolve the strategy section into a typed spec.
    pub fn strategy_spec(&self) -> Result<StrategySpec, ConfigError> {
        let kind = self.strategy.kind.as_str();
        let params = self
            .strategy
            .params
            .clone()
            .unwrap_or_else(|| toml::Value::Table(Default::default()));
        let bad_params = |source| ConfigError::Params {
            kind: kind.to_string(),
            source,
        };
        match kind {
            "breakout" => {
                let p: BreakoutParams = params.try_into().map_err(bad_params)?;
                Ok(StrategySpec::Breakout(p))
            }
            "trend_following" => {
                let p: TrendParams = params.try_into().map_err(bad_params)?;
                Ok(StrategySpec::TrendFollowing(p))
            }
            other => Err(StrategyError::NotImplemented(other.to_string()).into()),
        }
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two identical configs share a RunId, so artifacts and cached results
    /// can be matched across runs.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
