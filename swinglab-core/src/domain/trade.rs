//! TradeEvent — one ledger entry per execution.

use super::position::Direction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What an execution did.
///
/// `Close*` is a strategy-driven exit (reversal or trend exit); `StopLoss*`
/// is an intrabar stop fill. Both realize P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    EntryLong,
    EntryShort,
    CloseLong,
    CloseShort,
    StopLossLong,
    StopLossShort,
}

impl TradeAction {
    pub fn is_entry(self) -> bool {
        matches!(self, TradeAction::EntryLong | TradeAction::EntryShort)
    }

    pub fn is_exit(self) -> bool {
        !self.is_entry()
    }

    /// Side of the position this action opened or closed.
    pub fn direction(self) -> Direction {
        match self {
            TradeAction::EntryLong | TradeAction::CloseLong | TradeAction::StopLossLong => {
                Direction::Long
            }
            TradeAction::EntryShort | TradeAction::CloseShort | TradeAction::StopLossShort => {
                Direction::Short
            }
        }
    }
}

/// One executed trade, as recorded in the ledger.
///
/// `pnl` is `Some` exactly for exits. `equity_after` is the running capital
/// after this event: unchanged for entries (nothing is realized yet),
/// post-P&L for exits. Events can only be built through [`TradeEvent::entry`]
/// and [`TradeEvent::exit`], which enforce the pnl rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub price: f64,
    pub size: f64,
    pub pnl: Option<f64>,
    pub equity_after: f64,
    pub comment: String,
}

impl TradeEvent {
    /// Record an opening execution. Equity is carried through unchanged.
    pub fn entry(
        date: NaiveDate,
        direction: Direction,
        price: f64,
        size: f64,
        equity: f64,
        comment: impl Into<String>,
    ) -> Self {
        let action = match direction {
            Direction::Long => TradeAction::EntryLong,
            Direction::Short => TradeAction::EntryShort,
        };
        Self {
            date,
            action,
            price,
            size,
            pnl: None,
            equity_after: equity,
            comment: comment.into(),
        }
    }

    /// Record a closing execution with its realized P&L and the equity
    /// after that P&L has been applied.
    pub fn exit(
        date: NaiveDate,
        action: TradeAction,
        price: f64,
        size: f64,
        pnl: f64,
        equity_after: f64,
        comment: impl Into<String>,
    ) -> Self {
        debug_assert!(action.is_exit(), "exit() requires a closing action");
        Self {
            date,
            action,
            price,
            size,
            pnl: Some(pnl),
            equity_after,
            comment: comment.into(),
        }
    }

    pub fn is_winner(&self) -> bool {
        matches!(self.pnl, Some(p) if p > 0.0)
    }
}
