//! Route definitions for the wellness dashboard.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats         -> stats
/// GET /history       -> history
/// GET /timeline      -> timeline
/// GET /distribution  -> distribution
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/history", get(dashboard::history))
        .route("/timeline", get(dashboard::timeline))
        .route("/distribution", get(dashboard::distribution))
}
