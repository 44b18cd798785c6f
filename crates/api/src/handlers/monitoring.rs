//! Handlers for starting, stopping, and querying monitoring sessions.
//!
//! Each user has at most one session; all endpoints operate on the session
//! of the authenticated caller. All endpoints require [`AuthUser`].

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use pulsewatch_monitor::{MonitorSnapshot, MonitorStatus, StartOutcome, StopOutcome};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for `POST /monitoring/start` and `POST /monitoring/stop`.
#[derive(Debug, Serialize)]
pub struct SessionActionResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Response for `GET /monitoring/status`.
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub monitoring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_data: Option<MonitorSnapshot>,
    pub message: &'static str,
}

/// POST /monitoring/start -- begin monitoring the authenticated user.
///
/// Starting an already-monitored user is a no-op reported as
/// `already_active`, not an error. A session-construction failure is the
/// only way this endpoint errors.
pub async fn start(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<SessionActionResponse>> {
    let outcome = state.registry.start(user.user_id).await?;

    let response = match outcome {
        StartOutcome::Started => SessionActionResponse {
            status: "started",
            message: "Monitoring session started",
        },
        StartOutcome::AlreadyActive => SessionActionResponse {
            status: "already_active",
            message: "Monitoring is already active for this user",
        },
    };

    Ok(Json(response))
}

/// POST /monitoring/stop -- stop monitoring the authenticated user.
///
/// Stopping a user with no session is a no-op reported as `not_active`.
pub async fn stop(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<SessionActionResponse>> {
    let response = match state.registry.stop(user.user_id).await {
        StopOutcome::Stopped => SessionActionResponse {
            status: "stopped",
            message: "Monitoring session stopped",
        },
        StopOutcome::NotActive => SessionActionResponse {
            status: "not_active",
            message: "No monitoring session is active for this user",
        },
    };

    Ok(Json(response))
}

/// GET /monitoring/status -- report the latest snapshot for the caller.
///
/// Never blocks on session I/O; the snapshot is whatever the session loop
/// last published (the placeholder until the first tick completes).
pub async fn status(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SessionStatusResponse>> {
    let response = match state.registry.status(user.user_id).await {
        MonitorStatus::Active(snapshot) => SessionStatusResponse {
            monitoring: true,
            latest_data: Some(snapshot),
            message: "Monitoring is active",
        },
        MonitorStatus::Inactive => SessionStatusResponse {
            monitoring: false,
            latest_data: None,
            message: "Monitoring is not active",
        },
    };

    Ok(Json(response))
}
