//! The "latest" value a session publishes for `status()` callers.

use serde::Serialize;

use pulsewatch_core::classify::Classification;
use pulsewatch_core::label::StressLabel;
use pulsewatch_core::reading::{Reading, ReadingSource};
use pulsewatch_core::types::Timestamp;

/// Most recent reading+classification pair for one session.
///
/// Published atomically by the session loop after each completed tick;
/// read by arbitrary request tasks without ever blocking on the loop.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub label: StressLabel,
    pub confidence: f64,
    pub timestamp: Timestamp,
    /// Human-readable session state: "No data yet", "Active", or
    /// "Collecting" (reading acquired but no classifier bound).
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ReadingSource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<String>,
}

impl MonitorSnapshot {
    /// The well-defined value returned before any tick has completed.
    pub fn placeholder() -> Self {
        Self {
            label: StressLabel::Baseline,
            confidence: 0.4,
            timestamp: chrono::Utc::now(),
            status: "No data yet",
            source: None,
            factors: Vec::new(),
        }
    }

    /// Snapshot of a fully classified tick.
    pub fn classified(reading: &Reading, classification: &Classification) -> Self {
        Self {
            label: classification.label,
            confidence: classification.confidence,
            timestamp: reading.captured_at,
            status: "Active",
            source: Some(reading.source),
            factors: classification.factors.clone(),
        }
    }

    /// Degraded snapshot for collect-only mode (no classifier bound).
    pub fn collecting(reading: &Reading) -> Self {
        Self {
            label: StressLabel::Baseline,
            confidence: 0.4,
            timestamp: reading.captured_at,
            status: "Collecting",
            source: Some(reading.source),
            factors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_matches_contract() {
        let snapshot = MonitorSnapshot::placeholder();
        assert_eq!(snapshot.label, StressLabel::Baseline);
        assert_eq!(snapshot.confidence, 0.4);
        assert_eq!(snapshot.status, "No data yet");
        assert!(snapshot.source.is_none());
    }

    #[test]
    fn placeholder_serializes_without_empty_fields() {
        let json = serde_json::to_value(MonitorSnapshot::placeholder()).unwrap();
        assert_eq!(json["label"], "baseline");
        assert_eq!(json["status"], "No data yet");
        assert!(json.get("source").is_none());
        assert!(json.get("factors").is_none());
    }
}
