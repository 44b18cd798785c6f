//! Handlers for the wellness dashboard.
//!
//! Aggregation endpoints over the authenticated user's prediction records.
//! All endpoints require [`AuthUser`].

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use pulsewatch_core::wellness::{wellbeing, WellbeingSummary};
use pulsewatch_db::models::prediction::{HistoryPoint, LabelCount, TimelineBucket, UserStats};
use pulsewatch_db::repositories::PredictionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /dashboard/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// How many days back to include. Defaults to 7, capped at 90.
    pub days: Option<i64>,
}

/// Query params for `GET /dashboard/timeline`.
#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    /// How many hours back to include. Defaults to 24, capped at 168.
    pub hours: Option<i64>,
}

/// Combined payload for `GET /dashboard/stats`.
#[derive(Debug, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub stats: UserStats,
    #[serde(flatten)]
    pub wellbeing: WellbeingSummary,
}

/// GET /dashboard/stats -- per-user aggregates plus the wellbeing summary.
pub async fn stats(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StatsData>>> {
    let stats = PredictionRepo::user_stats(&state.pool, user.user_id).await?;
    let wellbeing = wellbeing(stats.total_predictions, stats.stress_episodes);

    Ok(Json(DataResponse {
        data: StatsData { stats, wellbeing },
    }))
}

/// GET /dashboard/history?days=N -- time-ordered prediction history.
pub async fn history(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<HistoryPoint>>>> {
    let days = params.days.unwrap_or(7).clamp(1, 90);
    let cutoff = chrono::Utc::now() - chrono::Duration::days(days);

    let points = PredictionRepo::history_since(&state.pool, user.user_id, cutoff).await?;
    Ok(Json(DataResponse { data: points }))
}

/// GET /dashboard/timeline?hours=N -- hourly stress-ratio buckets.
pub async fn timeline(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TimelineQuery>,
) -> AppResult<Json<DataResponse<Vec<TimelineBucket>>>> {
    let hours = params.hours.unwrap_or(24).clamp(1, 168);
    let cutoff = chrono::Utc::now() - chrono::Duration::hours(hours);

    let buckets = PredictionRepo::timeline_since(&state.pool, user.user_id, cutoff).await?;
    Ok(Json(DataResponse { data: buckets }))
}

/// GET /dashboard/distribution -- per-label prediction counts.
pub async fn distribution(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<LabelCount>>>> {
    let counts = PredictionRepo::label_distribution(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: counts }))
}
