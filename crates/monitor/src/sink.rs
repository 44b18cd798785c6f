//! The persistence boundary for derived prediction records.

use async_trait::async_trait;

use pulsewatch_core::classify::{derived_stress_score, Classification};
use pulsewatch_core::reading::Reading;
use pulsewatch_core::types::DbId;
use pulsewatch_db::models::prediction::NewPrediction;
use pulsewatch_db::repositories::PredictionRepo;
use pulsewatch_db::DbPool;

/// A persistence attempt failed. Transient by contract: the session logs
/// it and continues; it never stops the loop.
#[derive(Debug, thiserror::Error)]
#[error("Prediction sink failed: {0}")]
pub struct SinkError(pub String);

impl From<sqlx::Error> for SinkError {
    fn from(err: sqlx::Error) -> Self {
        SinkError(err.to_string())
    }
}

/// Durably appends one prediction record per successful tick.
#[async_trait]
pub trait PredictionSink: Send + Sync {
    async fn persist(
        &self,
        user_id: DbId,
        reading: &Reading,
        classification: &Classification,
    ) -> Result<(), SinkError>;
}

/// Postgres-backed sink writing through [`PredictionRepo`].
pub struct PgPredictionSink {
    pool: DbPool,
}

impl PgPredictionSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionSink for PgPredictionSink {
    async fn persist(
        &self,
        user_id: DbId,
        reading: &Reading,
        classification: &Classification,
    ) -> Result<(), SinkError> {
        let raw_features = serde_json::to_value(reading)
            .map_err(|e| SinkError(format!("reading serialization failed: {e}")))?;

        let record = NewPrediction {
            user_id,
            recorded_at: reading.captured_at,
            label: classification.label,
            confidence: classification.confidence,
            raw_features,
            model_used: classification.model_used.clone(),
            factors: classification.factors.clone(),
            heart_rate: Some(reading.heart_rate),
            stress_score: derived_stress_score(classification.label, classification.confidence),
        };

        PredictionRepo::insert(&self.pool, &record).await?;
        Ok(())
    }
}
