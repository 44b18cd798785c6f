//! The closed set of affective-state labels a classification can carry.

use serde::{Deserialize, Serialize};

/// Affective state assigned to a physiological reading.
///
/// The set is closed: the `predictions.label` column carries a CHECK
/// constraint over exactly these three lowercase spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLabel {
    /// Resting state, no elevated arousal.
    Baseline,
    /// Elevated arousal attributed to stress.
    Stress,
    /// Elevated arousal attributed to amusement.
    Amusement,
}

impl StressLabel {
    /// The lowercase database/wire spelling of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLabel::Baseline => "baseline",
            StressLabel::Stress => "stress",
            StressLabel::Amusement => "amusement",
        }
    }
}

impl std::fmt::Display for StressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StressLabel {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(StressLabel::Baseline),
            "stress" => Ok(StressLabel::Stress),
            "amusement" => Ok(StressLabel::Amusement),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown stress label: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_through_str() {
        for label in [
            StressLabel::Baseline,
            StressLabel::Stress,
            StressLabel::Amusement,
        ] {
            assert_eq!(StressLabel::from_str(label.as_str()).unwrap(), label);
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StressLabel::Amusement).unwrap(),
            "\"amusement\""
        );
    }

    #[test]
    fn rejects_unknown_spelling() {
        assert!(StressLabel::from_str("Stress").is_err());
        assert!(StressLabel::from_str("neutral").is_err());
    }
}
