//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the fan-out hub for [`MonitorUpdate`]s. It is designed
//! to be shared via `Arc<EventBus>` between monitoring sessions (which
//! publish) and the WebSocket fan-out task (which subscribes).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use pulsewatch_core::classify::Classification;
use pulsewatch_core::label::StressLabel;
use pulsewatch_core::reading::Reading;
use pulsewatch_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// MonitorUpdate
// ---------------------------------------------------------------------------

/// One classified reading, emitted by a monitoring session for one user.
///
/// Subscribers scope delivery by `user_id`; the payload mirrors what the
/// session persisted for the same tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorUpdate {
    /// The monitored user this update belongs to.
    pub user_id: DbId,
    pub label: StressLabel,
    pub confidence: f64,
    /// Capture time of the underlying reading (UTC).
    pub timestamp: Timestamp,
    /// The raw reading the classification was derived from.
    pub reading: Reading,
    pub factors: Vec<String>,
}

impl MonitorUpdate {
    /// Build an update from a tick's reading and classification.
    pub fn from_tick(user_id: DbId, reading: &Reading, classification: &Classification) -> Self {
        Self {
            user_id,
            label: classification.label,
            confidence: classification.confidence,
            timestamp: reading.captured_at,
            reading: reading.clone(),
            factors: classification.factors.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for monitor updates.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`MonitorUpdate`].
pub struct EventBus {
    sender: broadcast::Sender<MonitorUpdate>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an update to all current subscribers.
    ///
    /// If there are no active subscribers the update is silently dropped;
    /// persistence happens inside the session, not on this channel.
    pub fn publish(&self, update: MonitorUpdate) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(update);
    }

    /// Subscribe to all updates published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorUpdate> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
