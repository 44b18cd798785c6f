//! In-process event infrastructure for monitor updates.
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`MonitorUpdate`] — the per-user update emitted once per successful
//!   monitoring tick.

pub mod bus;

pub use bus::{EventBus, MonitorUpdate};
