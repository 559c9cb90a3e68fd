//! Breakout-reversal strategy.
//!
//! Range breakouts above/below boundaries anchored at the bar's open trigger
//! long/short signals. Signals detected on bar `i` fill at bar `i+1`'s open
//! (next-bar execution); an opposite signal reverses the position directly,
//! long to short, with no flat bar in between. While a position is held, an
//! ATR stop recomputed from the CURRENT bar's ATR guards it — the stop
//! floats with volatility rather than freezing at entry. Stops fill
//! immediately at the stop price, unlike entries.

use serde::{Deserialize, Serialize};

use super::{
    check_allocation, check_period, check_positive, ParamError, Strategy,
};
use crate::domain::{Bar, Direction, TradeAction, TradeLedger};
use crate::engine::AccountState;
use crate::indicators::{atr, donchian_high, donchian_low};

/// Knobs for [`BreakoutReversal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutParams {
    /// Bars in the look-left window for the breakout range.
    pub lookback_period: usize,
    /// Boundary distance as a multiple of the breakout range.
    pub range_mult: f64,
    /// Stop distance as a multiple of current ATR.
    pub stop_loss_mult: f64,
    /// ATR window for the stop.
    pub atr_period: usize,
    /// Fraction of equity committed per entry.
    ///
    /// Defaults to 0.99 here vs. 0.95 for trend-following. The mismatch is
    /// deliberate, pending product clarification — do not unify. See
    /// DESIGN.md.
    pub allocation: f64,
}

impl Default for BreakoutParams {
    fn default() -> Self {
        Self {
            lookback_period: 20,
            range_mult: 0.5,
            stop_loss_mult: 2.5,
            atr_period: 14,
            allocation: 0.99,
        }
    }
}

impl BreakoutParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_period("lookback_period", self.lookback_period, 1)?;
        check_period("atr_period", self.atr_period, 1)?;
        check_positive("range_mult", self.range_mult)?;
        check_positive("stop_loss_mult", self.stop_loss_mult)?;
        check_allocation(self.allocation)
    }
}

/// FLAT → LONG ⇄ SHORT state machine with next-bar signal execution.
#[derive(Debug, Clone)]
pub struct BreakoutReversal {
    params: BreakoutParams,
    /// Direction change queued on the previous bar, awaiting this bar's
    /// open. Cleared every time it is consumed.
    pending: Option<Direction>,
}

impl BreakoutReversal {
    pub fn new(params: BreakoutParams) -> Self {
        Self {
            params,
            pending: None,
        }
    }

    /// Fill a consumed signal at this bar's open: close the opposite side
    /// first when reversing, then enter.
    fn execute_signal(
        &self,
        direction: Direction,
        bars: &[Bar],
        i: usize,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    ) {
        let bar = &bars[i];
        let fill = bar.open;

        if let Some(pos) = &account.position {
            if pos.direction == direction {
                return;
            }
            let (action, comment) = match direction {
                Direction::Long => (TradeAction::CloseShort, "Reverse to Long"),
                Direction::Short => (TradeAction::CloseLong, "Reverse to Short"),
            };
            account.close_position(action, bar.date, fill, ledger, comment);
        }

        let comment = match direction {
            Direction::Long => "Long Entry",
            Direction::Short => "Short Entry",
        };
        account.open_position(
            direction,
            bar.date,
            i,
            fill,
            self.params.allocation,
            ledger,
            comment,
        );
    }

    /// Intrabar stop off the current ATR. Fills at the stop price the
    /// moment the bar's range crosses it.
    fn check_stop(
        &self,
        bars: &[Bar],
        i: usize,
        atr_now: f64,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    ) {
        let Some(pos) = &account.position else {
            return;
        };
        let bar = &bars[i];
        let distance = atr_now * self.params.stop_loss_mult;
        match pos.direction {
            Direction::Long => {
                let stop = pos.entry_price - distance;
                if bar.low <= stop {
                    account.close_position(
                        TradeAction::StopLossLong,
                        bar.date,
                        stop,
                        ledger,
                        "SL Long",
                    );
                }
            }
            Direction::Short => {
                let stop = pos.entry_price + distance;
                if bar.high >= stop {
                    account.close_position(
                        TradeAction::StopLossShort,
                        bar.date,
                        stop,
                        ledger,
                        "SL Short",
                    );
                }
            }
        }
    }
}

impl Strategy for BreakoutReversal {
    fn name(&self) -> &'static str {
        "breakout"
    }

    fn warmup_bars(&self) -> usize {
        self.params.lookback_period.max(self.params.atr_period)
    }

    fn on_bar(
        &mut self,
        bars: &[Bar],
        i: usize,
        account: &mut AccountState,
        ledger: &mut TradeLedger,
    ) {
        let p = &self.params;
        // Inactive until the look-left range and ATR are both ready.
        let (Some(highest), Some(lowest), Some(atr_now)) = (
            donchian_high(bars, p.lookback_period, i),
            donchian_low(bars, p.lookback_period, i),
            atr(bars, p.atr_period, i),
        ) else {
            return;
        };

        let bar = &bars[i];
        let breakout_range = highest - lowest;
        let upper = bar.open + breakout_range * p.range_mult;
        let lower = bar.open - breakout_range * p.range_mult;
        let go_long = bar.high > upper;
        let go_short = bar.low < lower;

        // 1. A signal queued on the previous bar fills at this open.
        let mut executed = false;
        if let Some(direction) = self.pending.take() {
            self.execute_signal(direction, bars, i, account, ledger);
            executed = true;
        }

        // 2. Queue this bar's signal for the next open. Never re-queue the
        //    side already held; go_long wins when both boundaries break.
        let held = account.position.as_ref().map(|pos| pos.direction);
        let mut queued_reversal = false;
        if go_long && held != Some(Direction::Long) {
            self.pending = Some(Direction::Long);
            queued_reversal = held == Some(Direction::Short);
        } else if go_short && held != Some(Direction::Short) {
            self.pending = Some(Direction::Short);
            queued_reversal = held == Some(Direction::Long);
        }

        // 3. Stop check. A fill this bar or a queued reversal owns the bar:
        //    the reversal exits at the next open instead of the stop.
        if !executed && !queued_reversal {
            self.check_stop(bars, i, atr_now, account, ledger);
        }
    }
}
