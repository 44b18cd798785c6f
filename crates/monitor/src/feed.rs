//! The live feed boundary: one reading of proxy physiological values per
//! call.

use async_trait::async_trait;
use rand::Rng;
use chrono::Timelike;

use pulsewatch_core::reading::{Reading, ReadingSource};

/// A live feed read failed. Transient by contract: the session logs the
/// failure, skips the tick, and tries again after the next wait.
#[derive(Debug, thiserror::Error)]
#[error("Live feed read failed: {0}")]
pub struct FeedError(pub String);

/// Produces one reading per call.
///
/// Implementations backed by network I/O should bound their own call time
/// (timeout/retry policy belongs here, behind the trait, not in the
/// session loop).
#[async_trait]
pub trait LiveFeed: Send + Sync {
    async fn read(&self) -> Result<Reading, FeedError>;
}

/// Locally generated vitals with daytime-aware jitter.
///
/// Working hours (09:00-17:00 UTC) produce an elevated heart-rate and EDA
/// baseline so simulated days show believable stress variation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedFeed;

#[async_trait]
impl LiveFeed for SimulatedFeed {
    async fn read(&self) -> Result<Reading, FeedError> {
        let now = chrono::Utc::now();
        let mut rng = rand::rng();

        let (base_hr, hr_jitter, base_eda, eda_jitter) = if (9..=17).contains(&now.hour()) {
            (75.0, 16.0, 0.6, 0.6)
        } else {
            (65.0, 12.0, 0.3, 0.4)
        };

        let heart_rate: f64 = base_hr + rng.random_range(-hr_jitter..hr_jitter);
        let eda: f64 = base_eda + rng.random_range(-eda_jitter..eda_jitter);

        Ok(Reading {
            heart_rate: heart_rate.clamp(50.0, 140.0),
            eda: eda.max(0.01),
            temperature_celsius: 32.0 + rng.random_range(-0.6..0.6),
            respiration: 16.0 + rng.random_range(-6.0..6.0),
            accel_x: rng.random_range(-0.1..0.1),
            accel_y: rng.random_range(-0.1..0.1),
            accel_z: rng.random_range(-0.1..0.1),
            captured_at: now,
            source: ReadingSource::Simulated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_readings_stay_in_physiological_range() {
        let feed = SimulatedFeed;
        for _ in 0..100 {
            let reading = feed.read().await.expect("simulated feed never fails");
            assert!((50.0..=140.0).contains(&reading.heart_rate));
            assert!(reading.eda >= 0.01);
            assert!((31.0..=33.0).contains(&reading.temperature_celsius));
            assert_eq!(reading.source, ReadingSource::Simulated);
        }
    }
}
