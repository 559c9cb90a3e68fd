//! Choppiness Index.
//!
//! 100 * log10(sum(TR) / (highest_high - lowest_low)) / log10(period) over
//! the `period` bars ending at `i`. High values mean range-bound churn, low
//! values mean directional movement. A zero high-low range reads as
//! maximally choppy (100).

use crate::domain::Bar;
use crate::indicators::atr::true_range;

/// Choppiness over the `period` bars ending at `i` (inclusive).
///
/// Returns `None` when `i < period` (every TR in the window needs a previous
/// close) or when `period < 2` (log10(1) would divide by zero).
pub fn choppiness(bars: &[Bar], period: usize, i: usize) -> Option<f64> {
    if period < 2 || i >= bars.len() || i < period {
        return None;
    }
    let start = i + 1 - period;
    let mut sum_tr = 0.0;
    let mut highest = f64::NEG_INFINITY;
    let mut lowest = f64::INFINITY;
    for j in start..=i {
        sum_tr += true_range(bars, j);
        highest = highest.max(bars[j].high);
        lowest = lowest.min(bars[j].low);
    }
    let range = highest - lowest;
    if range <= 0.0 {
        return Some(100.0);
    }
    Some(100.0 * (sum_tr / range).log10() / (period as f64).log10())
}
