//! Prediction entity model and DTOs.
//!
//! The `predictions` table is the durable contract the dashboard and
//! exports read against; see the migration for the column constraints.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pulsewatch_core::label::StressLabel;
use pulsewatch_core::types::{DbId, Timestamp};

/// A persisted prediction row (append-only).
///
/// `label` carries the lowercase spelling enforced by the table's CHECK
/// constraint; parse via [`StressLabel`] when typed access is needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PredictionRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub recorded_at: Timestamp,
    pub label: String,
    pub confidence: f64,
    pub raw_features: serde_json::Value,
    pub model_used: String,
    pub factors: serde_json::Value,
    pub heart_rate: Option<f64>,
    pub stress_score: f64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new prediction row.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub user_id: DbId,
    pub recorded_at: Timestamp,
    pub label: StressLabel,
    pub confidence: f64,
    pub raw_features: serde_json::Value,
    pub model_used: String,
    pub factors: Vec<String>,
    pub heart_rate: Option<f64>,
    /// Recomputed from `label` and `confidence` by the caller, never
    /// copied from `confidence` directly.
    pub stress_score: f64,
}

/// Aggregate view: one user's prediction statistics.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    pub total_predictions: i64,
    pub stress_episodes: i64,
    pub baseline_count: i64,
    pub amusement_count: i64,
    pub avg_stress_score: Option<f64>,
    /// Stress predictions in the last 24 hours.
    pub stress_24h: i64,
}

/// One point of a user's prediction history, ordered by time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryPoint {
    pub recorded_at: Timestamp,
    pub label: String,
    pub confidence: f64,
    pub stress_score: f64,
}

/// One hourly bucket of the stress timeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineBucket {
    pub hour: Timestamp,
    /// Share of predictions in this hour labelled stress, in `[0, 1]`.
    pub stress_ratio: f64,
    pub count: i64,
}

/// Per-label prediction count for the distribution chart.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}
