//! Fan-out of monitor updates to WebSocket clients.
//!
//! Subscribes to the [`EventBus`](pulsewatch_events::EventBus) and forwards
//! every [`MonitorUpdate`] to the WebSocket connections of the user it
//! belongs to. Runs as a spawned task for the lifetime of the server and
//! is stopped via a [`CancellationToken`] during shutdown; waiting for the
//! bus to close is not enough, because the session factory keeps a sender
//! clone alive for as long as the registry exists.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use pulsewatch_events::MonitorUpdate;

use crate::ws::WsManager;

/// Routes monitor updates from the event bus to WebSocket clients.
pub struct UpdateFanout {
    ws_manager: Arc<WsManager>,
}

impl UpdateFanout {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Consume updates from `receiver` until `cancel` fires or the bus closes.
    ///
    /// A lagged receiver (bus buffer overrun) is logged and skipped; updates
    /// are live data, so dropped ones are simply superseded by the next tick.
    pub async fn run(
        self,
        mut receiver: broadcast::Receiver<MonitorUpdate>,
        cancel: CancellationToken,
    ) {
        tracing::info!("Update fan-out started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Update fan-out stopping");
                    break;
                }
                result = receiver.recv() => match result {
                    Ok(update) => {
                        self.deliver(update).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Update fan-out lagged behind the event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, update fan-out stopping");
                        break;
                    }
                },
            }
        }
    }

    /// Serialize one update and push it to the owning user's connections.
    async fn deliver(&self, update: MonitorUpdate) {
        let user_id = update.user_id;
        let frame = serde_json::json!({
            "type": "monitor.update",
            "data": update,
        });

        let text = match serde_json::to_string(&frame) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, user_id, "Failed to serialize monitor update");
                return;
            }
        };

        let sent = self
            .ws_manager
            .send_to_user(user_id, Message::Text(text.into()))
            .await;
        tracing::trace!(user_id, sent, "Monitor update delivered");
    }
}
