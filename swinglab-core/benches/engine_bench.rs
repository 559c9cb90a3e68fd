//! Engine throughput benchmarks.
//!
//! The loop recomputes rolling windows per bar (O(bars * lookback)), which
//! is fine for daily series of a few thousand points; these benches keep an
//! eye on that constant.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swinglab_core::domain::Bar;
use swinglab_core::engine::run_strategy;
use swinglab_core::strategy::{BreakoutParams, StrategySpec, TrendParams};

fn synthetic_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2010, 1, 4).unwrap();
    (0..n)
        .map(|i| {
            // Deterministic pseudo-cycle: trends up, chops, trends down.
            let t = i as f64;
            let close = 1_000.0 + 200.0 * (t / 40.0).sin() + t * 0.1;
            let open = close - 2.0 * (t / 7.0).cos();
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 8.0,
                low: open.min(close) - 8.0,
                close,
            }
        })
        .collect()
}

fn bench_breakout(c: &mut Criterion) {
    let bars = synthetic_bars(2_500);
    let spec = StrategySpec::Breakout(BreakoutParams::default());
    c.bench_function("breakout_2500_bars", |b| {
        b.iter(|| run_strategy(black_box(&spec), black_box(&bars), 100_000.0).unwrap())
    });
}

fn bench_trend(c: &mut Criterion) {
    let bars = synthetic_bars(2_500);
    let spec = StrategySpec::TrendFollowing(TrendParams::default());
    c.bench_function("trend_following_2500_bars", |b| {
        b.iter(|| run_strategy(black_box(&spec), black_box(&bars), 100_000.0).unwrap())
    });
}

criterion_group!(benches, bench_breakout, bench_trend);
criterion_main!(benches);
