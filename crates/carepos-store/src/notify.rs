//! # Change Notifications
//!
//! The cross-view "data changed, re-fetch" signal.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Change Notification Flow                             │
//! │                                                                         │
//! │  Billing view settles a sale                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  notifier.publish(BillSettled)         fire-and-forget:                 │
//! │  notifier.publish(InventoryChanged)    no subscribers? fine.            │
//! │       │                                slow subscriber? it laps.        │
//! │       ▼                                                                 │
//! │  Dashboard / listing views receive the event and RE-FETCH their         │
//! │  snapshots - events carry no payload, they are only a nudge.            │
//! │                                                                         │
//! │  No merging, no deltas: full re-fetch keeps views consistent            │
//! │  without coordinating cart state across tabs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;
use tracing::debug;

/// What changed. Subscribers re-fetch; the event carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A medicine record was created, updated, deleted, or decremented.
    InventoryChanged,
    /// A bill was settled and appended to history.
    BillSettled,
    /// Generic "refresh your counters" nudge.
    DashboardRefresh,
}

/// Broadcast bus for change events.
///
/// Cloning shares the underlying channel, so every layer can hold its
/// own handle.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

/// Buffered events per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

impl ChangeNotifier {
    /// Creates a bus with the default capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        ChangeNotifier { tx }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Fire-and-forget: a send with zero subscribers is not an error.
    pub fn publish(&self, event: ChangeEvent) {
        debug!(?event, "Publishing change event");
        let _ = self.tx.send(event);
    }

    /// Subscribes to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers (diagnostics).
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let notifier = ChangeNotifier::new();
        notifier.publish(ChangeEvent::InventoryChanged); // no panic, no error
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.publish(ChangeEvent::BillSettled);
        notifier.publish(ChangeEvent::InventoryChanged);

        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::BillSettled);
        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::InventoryChanged);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_get_events() {
        let notifier = ChangeNotifier::new();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        notifier.publish(ChangeEvent::DashboardRefresh);

        assert_eq!(rx1.recv().await.unwrap(), ChangeEvent::DashboardRefresh);
        assert_eq!(rx2.recv().await.unwrap(), ChangeEvent::DashboardRefresh);
    }
}
