//! Long-only trend-following strategy.
//!
//! Three gates must agree before an entry: a moving-average regime filter
//! (close above the slow SMA, fast SMA above slow), a strength filter (ADX
//! above threshold, Choppiness below threshold), and a Donchian breakout
//! trigger (close above the prior-window high). Entries fill on the SAME
//! bar's close — deliberately different from the breakout strategy's
//! next-bar fills. While long, an ATR trail ratchets under the highest
//! close seen since entry; falling back under the fast SMA exits at the
//! close.

use serde::{Deserialize, Serialize};

use super::{
    check_allocation, check_finite, check_period, check_positive, ParamError, Strategy,
};
use crate::domain::{Bar, Direction, TradeAction, TradeLedger};
use crate::engine::AccountState;
use crate::indicators::{adx, atr, choppiness, donchian_high, sma};

/// Knobs for [`TrendFollowing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParams {
    pub sma_fast_len: usize,
    pub sma_slow_len: usize,
    /// Look-left window for the breakout trigger.
    pub donchian_len: usize,
    pub atr_period: usize,
    /// Trail distance as a multiple of current ATR.
    pub atr_mult: f64,
    pub adx_period: usize,
    /// Entry requires ADX strictly above this.
    pub adx_threshold: f64,
    pub chop_period: usize,
    /// Entry requires Choppiness strictly below this.
    pub chop_threshold: f64,
    /// Fraction of equity committed per entry.
    ///
    /// Defaults to 0.95 here vs. 0.99 for breakout. The mismatch is
    /// deliberate, pending product clarification — do not unify. See
    /// DESIGN.md.
    pub allocation: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            sma_fast_len: 20,
            sma_slow_len: 50,
            donchian_len: 20,
            atr_period: 14,
            atr_mult: 3.0,
            adx_period: 14,
            adx_threshold: 20.0,
            chop_period: 14,
            chop_threshold: 50.0,
            allocation: 0.95,
        }
    }
}

impl TrendParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_period("sma_fast_len", self.sma_fast_len, 1)?;
        check_period("sma_slow_len", self.sma_slow_len, 1)?;
        check_period("donchian_len", self.donchian_len, 1)?;
        check_period("atr_period", self.atr_period, 1)?;
        check_period("adx_period", self.adx_period, 1)?;
        check_period("chop_period", self.chop_period, 2)?;
        check_positive("atr_mult", self.atr_mult)?;
        check_finite("adx_threshold", self.adx_threshold)?;
        check_finite("chop_threshold", self.chop_threshold)?;
        check_allocation(self.allocation)
    }
}

/// FLAT ⇄ LONG state machine. No short side.
#[derive(Debug, Clone)]
pub struct TrendFollowing {
    params: TrendParams,
    /// Highest close since entry, the trail anchor. Meaningful only while
    /// a position is open.
    peak_close: f64,
}

impl TrendFollowing {
    pub fn new(params: TrendParams) -> Self {
        Self {
            params,
            peak_close: 0.0,
        }
    }

    fn try_enter(
        &mut self,
        bars: &[Bar],
        i: usize,
        fast: f64,
        slow: f64,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    ) {
        let p = &self.params;
        let (Some(adx_now), Some(chop_now), Some(channel_high)) = (
            adx(bars, p.adx_period, i),
            choppiness(bars, p.chop_period, i),
            donchian_high(bars, p.donchian_len, i),
        ) else {
            return;
        };

        let bar = &bars[i];
        let regime_up = bar.close > slow && fast > slow;
        let strength = adx_now > p.adx_threshold && chop_now < p.chop_threshold;
        let breakout = bar.close > channel_high;
        if !(regime_up && strength && breakout) {
            return;
        }

        account.open_position(
            Direction::Long,
            bar.date,
            i,
            bar.close,
            p.allocation,
            ledger,
            "Long Entry",
        );
        self.peak_close = bar.close;
    }

    fn manage_exit(
        &mut self,
        bars: &[Bar],
        i: usize,
        fast: f64,
        atr_now: f64,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    ) {
        let bar = &bars[i];
        self.peak_close = self.peak_close.max(bar.close);
        let trail = self.peak_close - self.params.atr_mult * atr_now;

        // Trail check outranks the trend exit when both fire.
        if bar.low <= trail {
            account.close_position(
                TradeAction::StopLossLong,
                bar.date,
                trail,
                ledger,
                "Trailing Stop",
            );
        } else if bar.close < fast {
            account.close_position(
                TradeAction::CloseLong,
                bar.date,
                bar.close,
                ledger,
                "Trend Exit",
            );
        }
    }
}

impl Strategy for TrendFollowing {
    fn name(&self) -> &'static str {
        "trend_following"
    }

    fn warmup_bars(&self) -> usize {
        let p = &self.params;
        (p.sma_slow_len.saturating_sub(1))
            .max(p.sma_fast_len.saturating_sub(1))
            .max(p.donchian_len)
            .max(p.atr_period)
            .max(2 * p.adx_period)
            .max(p.chop_period)
    }

    fn on_bar(
        &mut self,
        bars: &[Bar],
        i: usize,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    ) {
        let p = &self.params;
        let (Some(fast), Some(slow), Some(atr_now)) = (
            sma(bars, p.sma_fast_len, i),
            sma(bars, p.sma_slow_len, i),
            atr(bars, p.atr_period, i),
        ) else {
            return;
        };

        if account.position.is_some() {
            self.manage_exit(bars, i, fast, atr_now, account, ledger);
        } else {
            self.try_enter(bars, i, fast, slow, account, ledger);
        }
    }
}
