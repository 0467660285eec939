//=========================================================================
// Notifications
//=========================================================================
//
// Transient messages emitted by the ledger and the sinks that show them.
//
// Delivery is best-effort: a sink that cannot take a message drops it
// and logs, it never reports failure back into the core.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::warn;

//=== Notification ========================================================

/// A message to display once, stamped with session time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub issued_at: Duration,
}

//=== NotificationSink ====================================================

/// Consumer of notifications (on-screen text, log, another thread...).
pub trait NotificationSink: Send {
    fn show(&mut self, notification: Notification);
}

//=== ChannelNotifier =====================================================

/// Forwards notifications over a crossbeam channel without blocking.
///
/// A full or disconnected channel drops the notification.
pub struct ChannelNotifier {
    sender: Sender<Notification>,
    dropped: u64,
}

impl ChannelNotifier {
    pub fn new(sender: Sender<Notification>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Creates a notifier and the receiving end of a bounded channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Notification>) {
        assert!(capacity > 0, "Channel capacity must be positive");
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self::new(tx), rx)
    }

    /// Number of notifications that could not be delivered.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl NotificationSink for ChannelNotifier {
    fn show(&mut self, notification: Notification) {
        match self.sender.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => {
                self.dropped += 1;
                warn!("Notification channel full, dropped {:?}", n.message);
            }
            Err(TrySendError::Disconnected(n)) => {
                self.dropped += 1;
                warn!("Notification receiver gone, dropped {:?}", n.message);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
