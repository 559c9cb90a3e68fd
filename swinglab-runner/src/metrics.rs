//! Performance metrics — pure functions that reduce a trade ledger to
//! aggregate statistics.
//!
//! Every metric is a pure function: trade events and/or initial capital in,
//! scalar out. Only closing trades (pnl present) contribute to P&L
//! statistics. Degenerate ratios resolve to sentinels (0 or +∞), never to
//! errors.

use serde::{Deserialize, Serialize};
use swinglab_core::domain::{Direction, TradeEvent};

/// Aggregate performance statistics for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// (final - initial) / initial.
    pub total_return: f64,
    pub net_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    /// Winners / closing trades, 0.0 when there are none.
    pub win_rate: f64,
    /// gross_profit / gross_loss; +∞ with profits and no losses, 0.0 with
    /// neither.
    pub profit_factor: f64,
    /// Largest peak-to-trough equity decline as a positive fraction,
    /// replayed in chronological order.
    pub max_drawdown: f64,
    pub final_equity: f64,
    pub peak_equity: f64,
    pub closing_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub long_trades: usize,
    pub short_trades: usize,
    pub average_trade: f64,
    pub average_winner: f64,
    pub average_loser: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from a chronological trade ledger.
    pub fn compute(trades: &[TradeEvent], initial_capital: f64) -> Self {
        let closers: Vec<&TradeEvent> = trades.iter().filter(|t| t.pnl.is_some()).collect();
        let gp = gross_profit(trades);
        let gl = gross_loss(trades);
        let winners = closers.iter().filter(|t| t.is_winner()).count();
        let losers = closers
            .iter()
            .filter(|t| matches!(t.pnl, Some(p) if p < 0.0))
            .count();
        let final_eq = final_equity(trades, initial_capital);

        Self {
            total_return: (final_eq - initial_capital) / initial_capital,
            net_profit: gp - gl,
            gross_profit: gp,
            gross_loss: gl,
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            max_drawdown: max_drawdown(trades, initial_capital),
            final_equity: final_eq,
            peak_equity: peak_equity(trades, initial_capital),
            closing_trades: closers.len(),
            winning_trades: winners,
            losing_trades: losers,
            long_trades: closers
                .iter()
                .filter(|t| t.action.direction() == Direction::Long)
                .count(),
            short_trades: closers
                .iter()
                .filter(|t| t.action.direction() == Direction::Short)
                .count(),
            average_trade: if closers.is_empty() {
                0.0
            } else {
                (gp - gl) / closers.len() as f64
            },
            average_winner: if winners == 0 { 0.0 } else { gp / winners as f64 },
            average_loser: if losers == 0 { 0.0 } else { gl / losers as f64 },
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Sum of positive realized P&L.
pub fn gross_profit(trades: &[TradeEvent]) -> f64 {
    trades
        .iter()
        .filter_map(|t| t.pnl)
        .filter(|&p| p > 0.0)
        .sum()
}

/// Magnitude of the summed negative realized P&L (non-negative).
pub fn gross_loss(trades: &[TradeEvent]) -> f64 {
    trades
        .iter()
        .filter_map(|t| t.pnl)
        .filter(|&p| p < 0.0)
        .sum::<f64>()
        .abs()
}

/// Fraction of closing trades that won. 0.0 with no closing trades.
pub fn win_rate(trades: &[TradeEvent]) -> f64 {
    let closers = trades.iter().filter(|t| t.pnl.is_some()).count();
    if closers == 0 {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / closers as f64
}

/// gross_profit / gross_loss.
///
/// A run with profits and zero losses maps to +∞; a run with neither maps
/// to 0.0. Callers display, they don't divide again.
pub fn profit_factor(trades: &[TradeEvent]) -> f64 {
    let gp = gross_profit(trades);
    let gl = gross_loss(trades);
    if gl == 0.0 {
        return if gp > 0.0 { f64::INFINITY } else { 0.0 };
    }
    gp / gl
}

/// Maximum drawdown as a positive fraction of the running equity peak.
///
/// Replays the ledger in CHRONOLOGICAL order, seeded at initial capital —
/// a reverse-order replay would track troughs-before-peaks and understate
/// the figure.
pub fn max_drawdown(trades: &[TradeEvent], initial_capital: f64) -> f64 {
    let mut peak = initial_capital;
    let mut max_dd = 0.0_f64;
    for trade in trades {
        let equity = trade.equity_after;
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            let dd = (peak - equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Equity after the last ledger event, or initial capital for an empty run.
pub fn final_equity(trades: &[TradeEvent], initial_capital: f64) -> f64 {
    trades
        .last()
        .map(|t| t.equity_after)
        .unwrap_or(initial_capital)
}

/// Highest equity seen during the replay (at least initial capital).
pub fn peak_equity(trades: &[TradeEvent], initial_capital: f64) -> f64 {
    trades
        .iter()
        .map(|t| t.equity_after)
        .fold(initial_capital, f64::max)
}
