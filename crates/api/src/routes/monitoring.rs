//! Route definitions for the monitoring session lifecycle.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::monitoring;
use crate::state::AppState;

/// Session routes mounted at `/monitoring`.
///
/// ```text
/// POST /start   -> start
/// POST /stop    -> stop
/// GET  /status  -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(monitoring::start))
        .route("/stop", post(monitoring::stop))
        .route("/status", get(monitoring::status))
}
