//! Donchian channel bands with look-left semantics.
//!
//! Both bands run over the `period` bars STRICTLY PRECEDING `i` — the
//! current bar never contributes to its own channel, so "high above the
//! upper band" is a genuine breakout of prior structure.

use crate::domain::Bar;

/// Highest high over `bars[i - period .. i]` (exclusive of bar `i`).
pub fn donchian_high(bars: &[Bar], period: usize, i: usize) -> Option<f64> {
    if period == 0 || i < period || i > bars.len() {
        return None;
    }
    Some(
        bars[i - period..i]
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max),
    )
}

/// Lowest low over `bars[i - period .. i]` (exclusive of bar `i`).
pub fn donchian_low(bars: &[Bar], period: usize, i: usize) -> Option<f64> {
    if period == 0 || i < period || i > bars.len() {
        return None;
    }
    Some(
        bars[i - period..i]
            .iter()
            .map(|b| b.low)
            .fold(f64::INFINITY, f64::min),
    )
}
