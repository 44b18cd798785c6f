//! The prediction-service boundary: classifications, the [`Classifier`]
//! trait, and the built-in heuristic implementation.
//!
//! Classifiers are infallible by contract. An implementation that hits an
//! internal failure must return [`fallback_classification`] rather than
//! propagate an error into the monitoring loop.

use serde::{Deserialize, Serialize};

use crate::label::StressLabel;
use crate::reading::Reading;

/// Model identifier reported when a classifier degrades internally.
pub const FALLBACK_MODEL: &str = "fallback";

/// The verdict a classifier produces for one [`Reading`].
///
/// Ephemeral: immediately converted into a persisted record, a broadcast
/// update, and a snapshot, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub label: StressLabel,
    /// Confidence in the assigned label, in `[0, 1]`.
    pub confidence: f64,
    /// Identifier of the model that produced this verdict.
    pub model_used: String,
    /// Human-readable contributing factors, most significant first.
    pub factors: Vec<String>,
}

/// Maps any classification onto a single comparable `[0, 1]` stress axis.
///
/// `confidence` if the label is stress, otherwise `1 - confidence`. Every
/// persisted record recomputes this; it is never copied from confidence.
pub fn derived_stress_score(label: StressLabel, confidence: f64) -> f64 {
    match label {
        StressLabel::Stress => confidence,
        _ => 1.0 - confidence,
    }
}

/// The degraded verdict returned when a classifier fails internally.
pub fn fallback_classification() -> Classification {
    Classification {
        label: StressLabel::Baseline,
        confidence: 0.5,
        model_used: FALLBACK_MODEL.to_string(),
        factors: Vec::new(),
    }
}

/// A pure prediction service: reading in, classification out.
///
/// Implementations must not panic or error for well-formed input; internal
/// failures are downgraded to [`fallback_classification`] at this boundary.
pub trait Classifier: Send + Sync {
    fn classify(&self, reading: &Reading) -> Classification;

    /// Identifier reported in persisted records and responses.
    fn model_name(&self) -> &str;
}

/// Threshold-based classifier over heart rate and electrodermal activity.
///
/// Stands in for the trained models: heart rate above 90 bpm or EDA above
/// 0.7 uS reads as stress, moderate elevation as amusement, anything else
/// as baseline.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub const MODEL_NAME: &'static str = "heuristic-threshold";
}

impl Classifier for HeuristicClassifier {
    fn classify(&self, reading: &Reading) -> Classification {
        let hr = reading.heart_rate;
        let eda = reading.eda;

        let (label, confidence) = if hr > 90.0 || eda > 0.7 {
            (StressLabel::Stress, 0.85)
        } else if hr > 75.0 || eda > 0.5 {
            (StressLabel::Amusement, 0.70)
        } else {
            (StressLabel::Baseline, 0.75)
        };

        Classification {
            label,
            confidence,
            model_used: Self::MODEL_NAME.to_string(),
            factors: vec![format!("Heart Rate: {hr:.0}"), format!("EDA: {eda:.2}")],
        }
    }

    fn model_name(&self) -> &str {
        Self::MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::ReadingSource;

    fn reading(heart_rate: f64, eda: f64) -> Reading {
        Reading {
            heart_rate,
            eda,
            temperature_celsius: 32.0,
            respiration: 16.0,
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: 0.0,
            captured_at: chrono::Utc::now(),
            source: ReadingSource::Simulated,
        }
    }

    #[test]
    fn elevated_heart_rate_classifies_as_stress() {
        let c = HeuristicClassifier.classify(&reading(95.0, 0.3));
        assert_eq!(c.label, StressLabel::Stress);
        assert_eq!(c.confidence, 0.85);
    }

    #[test]
    fn elevated_eda_alone_classifies_as_stress() {
        let c = HeuristicClassifier.classify(&reading(65.0, 0.8));
        assert_eq!(c.label, StressLabel::Stress);
    }

    #[test]
    fn moderate_elevation_classifies_as_amusement() {
        let c = HeuristicClassifier.classify(&reading(80.0, 0.4));
        assert_eq!(c.label, StressLabel::Amusement);
        assert_eq!(c.confidence, 0.70);
    }

    #[test]
    fn resting_vitals_classify_as_baseline() {
        let c = HeuristicClassifier.classify(&reading(62.0, 0.2));
        assert_eq!(c.label, StressLabel::Baseline);
        assert_eq!(c.confidence, 0.75);
    }

    #[test]
    fn factors_name_the_inputs() {
        let c = HeuristicClassifier.classify(&reading(95.0, 0.31));
        assert_eq!(c.factors, vec!["Heart Rate: 95", "EDA: 0.31"]);
    }

    #[test]
    fn stress_score_equals_confidence_only_for_stress() {
        assert_eq!(derived_stress_score(StressLabel::Stress, 0.85), 0.85);
        assert_eq!(derived_stress_score(StressLabel::Baseline, 0.75), 0.25);
        assert!((derived_stress_score(StressLabel::Amusement, 0.70) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn fallback_is_low_confidence_baseline() {
        let c = fallback_classification();
        assert_eq!(c.label, StressLabel::Baseline);
        assert_eq!(c.confidence, 0.5);
        assert_eq!(c.model_used, FALLBACK_MODEL);
        assert!(c.factors.is_empty());
    }
}
