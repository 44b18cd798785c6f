//! Wellbeing scoring for the dashboard.
//!
//! Collapses a user's prediction history into a 0-100 score and a coarse
//! status string. A user with no history scores 85 ("Getting Started").

use serde::Serialize;

/// Wellbeing summary derived from label counts.
#[derive(Debug, Clone, Serialize)]
pub struct WellbeingSummary {
    /// 0-100, higher is better.
    pub wellbeing_score: u8,
    pub wellness_status: &'static str,
    /// Share of predictions labelled stress, as a percentage.
    pub stress_ratio_pct: f64,
}

/// Compute the wellbeing summary from prediction counts.
///
/// The score is `100 - stress_ratio * 100`, clamped to `[0, 100]`.
pub fn wellbeing(total_predictions: i64, stress_episodes: i64) -> WellbeingSummary {
    if total_predictions <= 0 {
        return WellbeingSummary {
            wellbeing_score: 85,
            wellness_status: "Getting Started",
            stress_ratio_pct: 0.0,
        };
    }

    let stress_ratio = stress_episodes as f64 / total_predictions as f64;
    let score = (100.0 - stress_ratio * 100.0).clamp(0.0, 100.0) as u8;

    let status = match score {
        90..=100 => "Excellent",
        75..=89 => "Very Good",
        60..=74 => "Good",
        40..=59 => "Fair",
        _ => "Needs Attention",
    };

    WellbeingSummary {
        wellbeing_score: score,
        wellness_status: status,
        stress_ratio_pct: (stress_ratio * 1000.0).round() / 10.0,
    }
}
