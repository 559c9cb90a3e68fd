//! Property tests for engine invariants.
//!
//! Uses proptest to verify, over arbitrary valid bar sequences:
//! 1. Determinism — identical inputs give byte-identical trade ledgers
//! 2. Pairing — #entries == #exits + (1 if a position is open at end)
//! 3. pnl nullability — exactly the closing trades carry pnl
//! 4. Equity replay — equity_after values chain exactly from initial capital
//! 5. Indicator totality — no NaN/∞ once a window is ready

use chrono::NaiveDate;
use proptest::prelude::*;
use swinglab_core::domain::Bar;
use swinglab_core::engine::run_strategy;
use swinglab_core::indicators::{adx, atr, choppiness, donchian_high, donchian_low, sma};
use swinglab_core::strategy::{BreakoutParams, StrategySpec, TrendParams};

// ── Strategies (proptest) ────────────────────────────────────────────

/// A bar series from a bounded random walk: always sane, always ascending
/// in date.
fn arb_bars() -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((-3.0..3.0_f64, 0.0..4.0_f64, 0.0..4.0_f64), 0..80).prop_map(
        |steps| {
            let base_date = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
            let mut close = 100.0_f64;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (step, up, down))| {
                    let open = close;
                    close = (close + step).max(5.0);
                    let high = open.max(close) + up;
                    let low = (open.min(close) - down).max(1.0);
                    Bar {
                        date: base_date + chrono::Duration::days(i as i64),
                        open,
                        high,
                        low,
                        close,
                    }
                })
                .collect()
        },
    )
}

fn specs() -> Vec<StrategySpec> {
    vec![
        StrategySpec::Breakout(BreakoutParams {
            lookback_period: 5,
            range_mult: 0.4,
            stop_loss_mult: 1.5,
            atr_period: 4,
            allocation: 0.99,
        }),
        StrategySpec::TrendFollowing(TrendParams {
            sma_fast_len: 3,
            sma_slow_len: 6,
            donchian_len: 4,
            atr_period: 4,
            atr_mult: 2.0,
            adx_period: 3,
            adx_threshold: 15.0,
            chop_period: 4,
            chop_threshold: 60.0,
            allocation: 0.95,
        }),
    ]
}

proptest! {
    /// Replaying the same bars and parameters twice yields byte-identical
    /// trade ledgers.
    #[test]
    fn runs_are_deterministic(bars in arb_bars()) {
        for spec in specs() {
            let a = run_strategy(&spec, &bars, 50_000.0).unwrap();
            let b = run_strategy(&spec, &bars, 50_000.0).unwrap();
            prop_assert_eq!(
                serde_json::to_vec(&a.trades).unwrap(),
                serde_json::to_vec(&b.trades).unwrap()
            );
            prop_assert_eq!(a.final_equity, b.final_equity);
        }
    }

    /// Entry/exit pairing and pnl nullability hold for every run.
    #[test]
    fn ledger_invariants(bars in arb_bars()) {
        for spec in specs() {
            let out = run_strategy(&spec, &bars, 50_000.0).unwrap();
            let entries = out.trades.iter().filter(|t| t.action.is_entry()).count();
            let exits = out.trades.iter().filter(|t| t.action.is_exit()).count();
            prop_assert_eq!(entries, exits + usize::from(out.open_position.is_some()));
            for trade in &out.trades {
                prop_assert_eq!(trade.pnl.is_some(), trade.action.is_exit());
            }
        }
    }

    /// equity_after values replay exactly: unchanged on entries, stepped by
    /// pnl on exits, ending at final_equity.
    #[test]
    fn equity_chains_from_initial_capital(bars in arb_bars()) {
        for spec in specs() {
            let out = run_strategy(&spec, &bars, 50_000.0).unwrap();
            let mut equity = 50_000.0;
            for trade in &out.trades {
                if let Some(pnl) = trade.pnl {
                    equity += pnl;
                }
                prop_assert!((trade.equity_after - equity).abs() < 1e-9);
            }
            prop_assert!((out.final_equity - equity).abs() < 1e-9);
        }
    }

    /// Indicators never produce NaN/∞ once their window is ready.
    #[test]
    fn indicators_finite_once_ready(bars in arb_bars()) {
        for i in 0..bars.len() {
            for period in [1usize, 3, 5] {
                if let Some(v) = atr(&bars, period, i) {
                    prop_assert!(v.is_finite());
                }
                if let Some(v) = sma(&bars, period, i) {
                    prop_assert!(v.is_finite());
                }
                if let Some(v) = adx(&bars, period, i) {
                    prop_assert!(v.is_finite());
                    prop_assert!((0.0..=100.0).contains(&v));
                }
                if let Some(v) = donchian_high(&bars, period, i) {
                    prop_assert!(v.is_finite());
                }
                if let Some(v) = donchian_low(&bars, period, i) {
                    prop_assert!(v.is_finite());
                }
            }
            for period in [2usize, 4] {
                if let Some(v) = choppiness(&bars, period, i) {
                    prop_assert!(v.is_finite());
                }
            }
        }
    }
}
