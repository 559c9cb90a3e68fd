//! Mutable state that evolves bar-by-bar during a run.

use chrono::NaiveDate;

use crate::domain::{Direction, Position, TradeAction, TradeEvent, TradeLedger};

/// Running capital plus the single open position.
///
/// Equity changes only when a close realizes P&L; entries size off current
/// equity but do not move it. All trade recording funnels through
/// [`open_position`](AccountState::open_position) and
/// [`close_position`](AccountState::close_position) so the ledger and the
/// position can never disagree.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub equity: f64,
    pub position: Option<Position>,
}

impl AccountState {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            equity: initial_capital,
            position: None,
        }
    }

    /// Open a position sized at `allocation` of current equity and record
    /// the entry. Any previously open position must have been closed first.
    pub fn open_position(
        &mut self,
        direction: Direction,
        date: NaiveDate,
        bar_index: usize,
        price: f64,
        allocation: f64,
        ledger: &mut TradeLedger,
        comment: &str,
    ) {
        debug_assert!(
            self.position.is_none(),
            "opening a position while one is already open"
        );
        let size = self.equity * allocation / price;
        self.position = Some(Position {
            direction,
            entry_price: price,
            size,
            entry_date: date,
            entry_bar: bar_index,
        });
        ledger.record(TradeEvent::entry(
            date,
            direction,
            price,
            size,
            self.equity,
            comment,
        ));
    }

    /// Close the open position at `price`, realize its P&L into equity, and
    /// record the exit. No-op when flat.
    pub fn close_position(
        &mut self,
        action: TradeAction,
        date: NaiveDate,
        price: f64,
        ledger: &mut TradeLedger,
        comment: &str,
    ) {
        let Some(pos) = self.position.take() else {
            return;
        };
        debug_assert_eq!(action.direction(), pos.direction);
        let pnl = pos.pnl_at(price);
        self.equity += pnl;
        ledger.record(TradeEvent::exit(
            date, action, price, pos.size, pnl, self.equity, comment,
        ));
    }
}
