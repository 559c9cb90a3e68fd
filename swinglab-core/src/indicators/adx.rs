//! ADX — directional movement index, simplified single-pass form.
//!
//! Steps, over the `2 * period` bars of history ending at `i`:
//! 1. +DM / -DM from consecutive bars, TR per bar
//! 2. Wilder-smooth (RMA) each of the three series with `period`
//! 3. +DI = 100 * rma(+DM) / rma(TR), -DI likewise, from the final values
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI)
//!
//! The DX value is returned directly — there is NO second Wilder pass over a
//! DX series. That single-pass form is the contract here; it is not the full
//! textbook ADX smoothing chain.

use crate::domain::Bar;
use crate::indicators::atr::true_range;
use crate::indicators::rma::rma;

/// Directional index over `2 * period` history ending at `i`.
///
/// Returns `None` when `i < 2 * period`. Degenerate windows (zero smoothed
/// TR, or +DI and -DI both zero) yield 0.0 — no directional movement —
/// never NaN or infinity.
pub fn adx(bars: &[Bar], period: usize, i: usize) -> Option<f64> {
    if period == 0 || i >= bars.len() || i < 2 * period {
        return None;
    }

    let start = i + 1 - 2 * period;
    let mut plus_dm = Vec::with_capacity(2 * period);
    let mut minus_dm = Vec::with_capacity(2 * period);
    let mut tr = Vec::with_capacity(2 * period);

    for j in start..=i {
        let high_diff = bars[j].high - bars[j - 1].high;
        let low_diff = bars[j - 1].low - bars[j].low;
        plus_dm.push(if high_diff > low_diff && high_diff > 0.0 {
            high_diff
        } else {
            0.0
        });
        minus_dm.push(if low_diff > high_diff && low_diff > 0.0 {
            low_diff
        } else {
            0.0
        });
        tr.push(true_range(bars, j));
    }

    let smooth_tr = *rma(&tr, period).last()?;
    if smooth_tr <= 0.0 {
        return Some(0.0);
    }
    let plus_di = 100.0 * rma(&plus_dm, period).last()? / smooth_tr;
    let minus_di = 100.0 * rma(&minus_dm, period).last()? / smooth_tr;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return Some(0.0);
    }
    Some(100.0 * (plus_di - minus_di).abs() / di_sum)
}
