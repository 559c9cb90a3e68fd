//! TradeLedger — append-only record of every execution in one run.

use super::trade::TradeEvent;
use serde::{Deserialize, Serialize};

/// Append-only trade log.
///
/// Events are recorded in execution order and never mutated afterwards.
/// Guarantees maintained by the engine: every entry is followed by exactly
/// one exit unless the run ends with the position still open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeLedger {
    events: Vec<TradeEvent>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. There is deliberately no way to remove or edit one.
    pub fn record(&mut self, event: TradeEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TradeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Exits only — the trades that realized P&L.
    pub fn closing_trades(&self) -> impl Iterator<Item = &TradeEvent> {
        self.events.iter().filter(|e| e.pnl.is_some())
    }

    pub fn entry_count(&self) -> usize {
        self.events.iter().filter(|e| e.action.is_entry()).count()
    }

    pub fn exit_count(&self) -> usize {
        self.events.iter().filter(|e| e.action.is_exit()).count()
    }

    /// Check the entry/exit pairing invariant given whether a position is
    /// still open at the end of the run.
    pub fn pairing_holds(&self, position_open: bool) -> bool {
        let open = usize::from(position_open);
        self.entry_count() == self.exit_count() + open
    }

    pub fn into_events(self) -> Vec<TradeEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, TradeAction};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn pairing_with_open_position() {
        let mut ledger = TradeLedger::new();
        ledger.record(TradeEvent::entry(
            date(2),
            Direction::Long,
            100.0,
            1.0,
            10_000.0,
            "Long Entry",
        ));
        assert!(ledger.pairing_holds(true));
        assert!(!ledger.pairing_holds(false));
    }

    #[test]
    fn pairing_after_round_trip() {
        let mut ledger = TradeLedger::new();
        ledger.record(TradeEvent::entry(
            date(2),
            Direction::Short,
            100.0,
            1.0,
            10_000.0,
            "Short Entry",
        ));
        ledger.record(TradeEvent::exit(
            date(5),
            TradeAction::CloseShort,
            95.0,
            1.0,
            5.0,
            10_005.0,
            "Reverse to Long",
        ));
        assert!(ledger.pairing_holds(false));
        assert_eq!(ledger.closing_trades().count(), 1);
        assert_eq!(ledger.entry_count(), 1);
        assert_eq!(ledger.exit_count(), 1);
    }

    #[test]
    fn empty_ledger() {
        let ledger = TradeLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.pairing_holds(false));
        assert_eq!(ledger.closing_trades().count(), 0);
    }
}
