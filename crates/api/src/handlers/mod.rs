//! Request handlers, grouped by API area.

pub mod dashboard;
pub mod monitoring;
