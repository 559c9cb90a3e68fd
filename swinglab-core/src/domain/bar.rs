//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLC bar.
///
/// The engine consumes one ordered series of these per run. Volume is not
/// carried: neither strategy consults it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Returns true if any OHLC field is non-finite or non-positive.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite() && self.open > 0.0)
            || !(self.high.is_finite() && self.high > 0.0)
            || !(self.low.is_finite() && self.low > 0.0)
            || !(self.close.is_finite() && self.close > 0.0)
    }

    /// Basic OHLC sanity check: finite positive prices with high/low
    /// actually bracketing open and close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}
