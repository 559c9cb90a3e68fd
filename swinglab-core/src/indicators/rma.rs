//! Wilder smoothing (RMA).
//!
//! rma[0] = values[0]; rma[k] = (rma[k-1] * (period-1) + values[k]) / period.
//! Seeded from the first value rather than an SMA warmup — this matches the
//! directional-movement smoothing the ADX calculation expects.

/// Smooth a full series. Empty input yields an empty output.
pub fn rma(values: &[f64], period: usize) -> Vec<f64> {
    debug_assert!(period >= 1, "RMA period must be >= 1");
    let mut out = Vec::with_capacity(values.len());
    let p = period as f64;
    let mut prev = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(prev);
    for &v in &values[1..] {
        prev = (prev * (p - 1.0) + v) / p;
        out.push(prev);
    }
    out
}
