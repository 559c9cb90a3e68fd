//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR here is the arithmetic mean of TR over the `period` bars ending at
//! `i`, ready once `i >= period` so that every bar in the window has a
//! previous close.

use crate::domain::Bar;

/// True range of bar `j`. For `j == 0` there is no previous close, so the
/// value degrades to high - low.
pub fn true_range(bars: &[Bar], j: usize) -> f64 {
    let h = bars[j].high;
    let l = bars[j].low;
    if j == 0 {
        return h - l;
    }
    let pc = bars[j - 1].close;
    (h - l).max((h - pc).abs()).max((l - pc).abs())
}

/// Mean true range over the `period` bars ending at `i` (inclusive).
///
/// Returns `None` when `i < period` — the window would include a bar with
/// no previous close.
pub fn atr(bars: &[Bar], period: usize, i: usize) -> Option<f64> {
    if period == 0 || i >= bars.len() || i < period {
        return None;
    }
    let start = i + 1 - period;
    let sum: f64 = (start..=i).map(|j| true_range(bars, j)).sum();
    Some(sum / period as f64)
}
