//! Per-user real-time monitoring sessions.
//!
//! The [`MonitorRegistry`] is the process-wide table of active sessions,
//! keyed by user id. Each [`MonitorSession`] runs a bounded-rate polling
//! loop on its own tokio task: read one [`Reading`](pulsewatch_core::reading::Reading)
//! from the [`LiveFeed`], classify it, persist the derived record through
//! the [`PredictionSink`], broadcast it on the event bus, and publish the
//! latest snapshot for `status()` callers.
//!
//! All per-tick faults are contained inside the session; the only error
//! that ever reaches a caller is a session-construction failure from
//! [`MonitorRegistry::start`].

pub mod feed;
pub mod registry;
pub mod session;
pub mod sink;
pub mod snapshot;

pub use feed::{FeedError, LiveFeed, SimulatedFeed};
pub use registry::{
    FixedSessionFactory, MonitorConfig, MonitorError, MonitorRegistry, MonitorStatus,
    SessionFactory, StartOutcome, StopOutcome,
};
pub use session::{MonitorSession, SessionDeps};
pub use sink::{PgPredictionSink, PredictionSink, SinkError};
pub use snapshot::MonitorSnapshot;
