//! One timestamped snapshot of proxy physiological signals.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    /// Generated locally by the simulated feed.
    Simulated,
    /// Fetched from an external wearable-data API.
    External,
}

/// An immutable snapshot of proxy physiological signals.
///
/// Produced fresh on every monitoring tick and never persisted verbatim;
/// only derived fields (and the JSON form of the whole snapshot as
/// `raw_features`) reach the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// Heart rate in beats per minute.
    pub heart_rate: f64,
    /// Electrodermal activity in microsiemens.
    pub eda: f64,
    /// Skin temperature in degrees Celsius.
    pub temperature_celsius: f64,
    /// Respiration rate in breaths per minute.
    pub respiration: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    /// When the reading was captured (UTC).
    pub captured_at: Timestamp,
    pub source: ReadingSource,
}
