//! Repository for the `predictions` table (append-only time-series).

use sqlx::PgPool;

use pulsewatch_core::types::{DbId, Timestamp};

use crate::models::prediction::{
    HistoryPoint, LabelCount, NewPrediction, PredictionRecord, TimelineBucket, UserStats,
};

/// Column list for `predictions` SELECT queries (includes `id` and `created_at`).
const COLUMNS: &str = "\
    id, user_id, recorded_at, label, confidence, raw_features, \
    model_used, factors, heart_rate, stress_score, created_at";

/// Column list for INSERT statements (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    user_id, recorded_at, label, confidence, raw_features, \
    model_used, factors, heart_rate, stress_score";

/// Provides query operations for prediction records.
pub struct PredictionRepo;

impl PredictionRepo {
    /// Insert a single prediction record.
    pub async fn insert(
        pool: &PgPool,
        prediction: &NewPrediction,
    ) -> Result<PredictionRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO predictions ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PredictionRecord>(&query)
            .bind(prediction.user_id)
            .bind(prediction.recorded_at)
            .bind(prediction.label.as_str())
            .bind(prediction.confidence)
            .bind(&prediction.raw_features)
            .bind(&prediction.model_used)
            .bind(serde_json::json!(prediction.factors))
            .bind(prediction.heart_rate)
            .bind(prediction.stress_score)
            .fetch_one(pool)
            .await
    }

    /// Count all records for a user.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM predictions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Aggregate statistics for one user, computed in a single query.
    pub async fn user_stats(pool: &PgPool, user_id: DbId) -> Result<UserStats, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT \
                 COUNT(*) AS total_predictions, \
                 COUNT(*) FILTER (WHERE label = 'stress') AS stress_episodes, \
                 COUNT(*) FILTER (WHERE label = 'baseline') AS baseline_count, \
                 COUNT(*) FILTER (WHERE label = 'amusement') AS amusement_count, \
                 AVG(stress_score) AS avg_stress_score, \
                 COUNT(*) FILTER (WHERE label = 'stress' \
                     AND recorded_at > now() - interval '24 hours') AS stress_24h \
             FROM predictions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Time-ordered history since `cutoff` for one user.
    pub async fn history_since(
        pool: &PgPool,
        user_id: DbId,
        cutoff: Timestamp,
    ) -> Result<Vec<HistoryPoint>, sqlx::Error> {
        sqlx::query_as::<_, HistoryPoint>(
            "SELECT recorded_at, label, confidence, stress_score \
             FROM predictions \
             WHERE user_id = $1 AND recorded_at > $2 \
             ORDER BY recorded_at ASC",
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Hourly stress-ratio buckets since `cutoff` for one user.
    pub async fn timeline_since(
        pool: &PgPool,
        user_id: DbId,
        cutoff: Timestamp,
    ) -> Result<Vec<TimelineBucket>, sqlx::Error> {
        sqlx::query_as::<_, TimelineBucket>(
            "SELECT \
                 date_trunc('hour', recorded_at) AS hour, \
                 AVG(CASE WHEN label = 'stress' THEN 1.0 ELSE 0.0 END)::float8 AS stress_ratio, \
                 COUNT(*) AS count \
             FROM predictions \
             WHERE user_id = $1 AND recorded_at > $2 \
             GROUP BY hour \
             ORDER BY hour ASC",
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Per-label counts for one user.
    pub async fn label_distribution(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT label, COUNT(*) AS count \
             FROM predictions WHERE user_id = $1 \
             GROUP BY label ORDER BY label ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// The most recent records for one user, newest first.
    pub async fn recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<PredictionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predictions \
             WHERE user_id = $1 \
             ORDER BY recorded_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, PredictionRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete records recorded before `cutoff`. Returns the number deleted.
    ///
    /// This is the only mutation path besides insert; used by the
    /// retention background job.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM predictions WHERE recorded_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
