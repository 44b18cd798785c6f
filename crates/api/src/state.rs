use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;
use pulsewatch_events::EventBus;
use pulsewatch_monitor::MonitorRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pulsewatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Per-user monitoring session registry.
    pub registry: Arc<MonitorRegistry>,
    /// In-process event bus carrying monitor updates.
    pub event_bus: Arc<EventBus>,
}
