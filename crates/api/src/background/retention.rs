//! Periodic cleanup of old prediction records.
//!
//! Spawns a background task that deletes rows from `predictions` older
//! than the configured retention period. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use pulsewatch_db::repositories::PredictionRepo;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the prediction retention cleanup loop.
///
/// Deletes prediction rows older than `retention_days`. Runs until
/// `cancel` is triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Prediction retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Prediction retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match PredictionRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Prediction retention: purged old rows");
                        } else {
                            tracing::debug!("Prediction retention: no rows to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Prediction retention: cleanup failed");
                    }
                }
            }
        }
    }
}
