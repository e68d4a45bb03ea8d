//! Snapshot event bus: cells publish, observers subscribe.
//!
//! Cells publish a rendered frame of the whole colony after each update.
//! The bus is a bounded broadcast channel: publishing never blocks, zero
//! subscribers is fine (and skips rendering entirely at the call sites),
//! and a subscriber that falls more than the bus capacity behind loses the
//! oldest events rather than stalling the colony.

use tokio::sync::broadcast;

/// A rendered snapshot of the whole colony at the instant one cell updated.
#[derive(Debug, Clone)]
pub struct SnapshotEvent {
    /// Index of the cell whose update produced this frame
    pub cell: usize,
    /// Rendered state vector, in index order
    pub frame: String,
}

/// Bounded, non-blocking fan-out bus for [`SnapshotEvent`]s.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SnapshotEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Never blocks; dropped silently when nobody listens.
    pub fn publish(&self, event: SnapshotEvent) {
        let _ = self.tx.send(event);
    }

    /// Whether any subscriber is currently attached.
    pub fn has_subscribers(&self) -> bool {
        self.tx.receiver_count() > 0
    }

    /// Attach a new independent subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.tx.subscribe()
    }
}
