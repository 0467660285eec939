//=========================================================================
// Score Ledger
//=========================================================================
//
// Running score, drop count and ordered log of removed objects.
//
// register() effects, in order:
//   1. drop_count += 1
//   2. total_score += value     (no clamping, may go negative)
//   3. log.push((name, value))
//   4. "Removed {name} (+{value})" → sink, if one is attached
//
// Readers pull `total_score()` / `drop_count()` whenever they refresh;
// nothing is cached.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::info;

//=== Internal Dependencies ===============================================

use super::notify::{Notification, NotificationSink};
use crate::core::world::Descriptor;

//=== DropRecord ==========================================================

/// One registered drop, as kept in the ledger log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRecord {
    pub name: String,
    pub value: i32,
}

impl DropRecord {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

//=== ScoreLedger =========================================================

/// Session score state, mutated only through [`register`](Self::register).
#[derive(Default)]
pub struct ScoreLedger {
    total_score: i64,
    drop_count: u64,
    log: Vec<DropRecord>,
    sink: Option<Box<dyn NotificationSink>>,
}

impl ScoreLedger {
    /// Creates an empty ledger with no notification sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ledger that forwards notifications to `sink`.
    pub fn with_sink(sink: impl NotificationSink + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
            ..Self::default()
        }
    }

    //--- Registration -----------------------------------------------------

    /// Records a drop and returns the notification it produced.
    ///
    /// The notification is also forwarded to the attached sink, if any.
    pub fn register(&mut self, descriptor: &Descriptor, issued_at: Duration) -> Notification {
        self.drop_count += 1;
        self.total_score += i64::from(descriptor.value);
        self.log
            .push(DropRecord::new(descriptor.name.clone(), descriptor.value));

        info!(
            "Registered drop {} ({}) → score {}, count {}",
            descriptor.name, descriptor.value, self.total_score, self.drop_count
        );

        let notification = Notification {
            message: format!("Removed {} (+{})", descriptor.name, descriptor.value),
            issued_at,
        };

        if let Some(sink) = self.sink.as_mut() {
            sink.show(notification.clone());
        }

        notification
    }

    //--- Sink Management --------------------------------------------------

    /// Attaches a sink, returning the previous one.
    pub fn set_sink(
        &mut self,
        sink: Box<dyn NotificationSink>,
    ) -> Option<Box<dyn NotificationSink>> {
        self.sink.replace(sink)
    }

    /// Detaches the current sink.
    pub fn take_sink(&mut self) -> Option<Box<dyn NotificationSink>> {
        self.sink.take()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    //--- Query API --------------------------------------------------------

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn drop_count(&self) -> u64 {
        self.drop_count
    }

    /// Registered drops, oldest first.
    pub fn log(&self) -> &[DropRecord] {
        &self.log
    }
}

impl fmt::Debug for ScoreLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreLedger")
            .field("total_score", &self.total_score)
            .field("drop_count", &self.drop_count)
            .field("log", &self.log)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::ChannelNotifier;

    const T0: Duration = Duration::ZERO;

    #[test]
    fn new_ledger_is_empty() {
        let ledger = ScoreLedger::new();
        assert_eq!(ledger.total_score(), 0);
        assert_eq!(ledger.drop_count(), 0);
        assert!(ledger.log().is_empty());
        assert!(!ledger.has_sink());
    }

    #[test]
    fn register_is_additive_and_ordered() {
        let mut ledger = ScoreLedger::new();

        ledger.register(&Descriptor::new("Can", 5), T0);
        ledger.register(&Descriptor::new("Bottle", 3), T0);

        assert_eq!(ledger.total_score(), 8);
        assert_eq!(ledger.drop_count(), 2);
        assert_eq!(
            ledger.log(),
            &[DropRecord::new("Can", 5), DropRecord::new("Bottle", 3)]
        );
    }

    #[test]
    fn negative_values_are_not_clamped() {
        let mut ledger = ScoreLedger::new();

        ledger.register(&Descriptor::new("Trap", -10), T0);

        assert_eq!(ledger.total_score(), -10);
        assert_eq!(ledger.drop_count(), 1);
    }

    #[test]
    fn notification_text_and_timestamp() {
        let mut ledger = ScoreLedger::new();

        let note = ledger.register(&Descriptor::new("Bottle", 2), Duration::from_secs(3));

        assert_eq!(note.message, "Removed Bottle (+2)");
        assert_eq!(note.issued_at, Duration::from_secs(3));
    }

    #[test]
    fn notification_forwarded_to_sink() {
        let (notifier, rx) = ChannelNotifier::bounded(8);
        let mut ledger = ScoreLedger::with_sink(notifier);

        ledger.register(&Descriptor::new("Can", 5), T0);
        ledger.register(&Descriptor::new("Trap", -1), T0);

        assert_eq!(rx.try_recv().unwrap().message, "Removed Can (+5)");
        assert_eq!(rx.try_recv().unwrap().message, "Removed Trap (+-1)");
    }

    #[test]
    fn missing_sink_does_not_affect_counters() {
        let (notifier, rx) = ChannelNotifier::bounded(8);
        let mut ledger = ScoreLedger::with_sink(notifier);
        assert!(ledger.take_sink().is_some());

        ledger.register(&Descriptor::new("Can", 5), T0);

        assert_eq!(ledger.total_score(), 5);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn set_sink_replaces_previous() {
        let (first, rx_first) = ChannelNotifier::bounded(8);
        let (second, rx_second) = ChannelNotifier::bounded(8);
        let mut ledger = ScoreLedger::with_sink(first);

        assert!(ledger.set_sink(Box::new(second)).is_some());
        ledger.register(&Descriptor::new("Can", 5), T0);

        assert!(rx_first.try_recv().is_err());
        assert!(rx_second.try_recv().is_ok());
    }
}
