//! Simple Moving Average (SMA) of close prices.
//!
//! Ready at `i == period - 1` (the first index with a full window).

use crate::domain::Bar;

/// Mean close over the `period` bars ending at `i` (inclusive).
pub fn sma(bars: &[Bar], period: usize, i: usize) -> Option<f64> {
    if period == 0 || i >= bars.len() || i + 1 < period {
        return None;
    }
    let start = i + 1 - period;
    let sum: f64 = bars[start..=i].iter().map(|b| b.close).sum();
    Some(sum / period as f64)
}
