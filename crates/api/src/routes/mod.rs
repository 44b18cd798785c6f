pub mod dashboard;
pub mod health;
pub mod monitoring;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                        monitor-update WebSocket (?token= auth)
///
/// /monitoring/start          start session (POST)
/// /monitoring/stop           stop session (POST)
/// /monitoring/status         latest snapshot (GET)
///
/// /dashboard/stats           per-user aggregates + wellbeing (GET)
/// /dashboard/history         history rows, ?days=N (GET)
/// /dashboard/timeline        hourly buckets, ?hours=N (GET)
/// /dashboard/distribution    per-label counts (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Session lifecycle.
        .nest("/monitoring", monitoring::router())
        // Wellness dashboard aggregates.
        .nest("/dashboard", dashboard::router())
}
