//! Pure domain logic for pulsewatch: shared types, the stress label set,
//! physiological readings, the classifier boundary, and dashboard scoring.
//!
//! This crate performs no I/O. Everything here is deterministic and
//! side-effect-free so it can be exercised directly in unit tests.

pub mod classify;
pub mod error;
pub mod label;
pub mod reading;
pub mod types;
pub mod wellness;
