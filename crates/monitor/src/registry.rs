//! Process-wide registry of active monitoring sessions.
//!
//! Created once at application startup, injected through shared state,
//! and torn down via [`MonitorRegistry::shutdown`] during graceful
//! shutdown. The registry is the single source of truth for "who is being
//! monitored right now".

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use pulsewatch_core::types::DbId;

use crate::session::{MonitorSession, SessionDeps};
use crate::snapshot::MonitorSnapshot;

/// How long `stop`/`shutdown` wait for a session loop to exit before
/// aborting its task.
const SESSION_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session for this user already exists; no side effects.
    AlreadyActive,
}

/// Outcome of a `stop` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    /// No session for this user existed; no side effects.
    NotActive,
}

/// Result of a `status` query.
#[derive(Debug, Clone)]
pub enum MonitorStatus {
    Active(MonitorSnapshot),
    Inactive,
}

/// Builds the dependency set for a new session.
///
/// The only fault `start` ever surfaces to callers is a failure here;
/// the registry is left unchanged when it occurs.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn deps_for(&self, user_id: DbId) -> Result<SessionDeps, MonitorError>;
}

/// Factory handing out clones of one shared dependency set.
pub struct FixedSessionFactory {
    deps: SessionDeps,
}

impl FixedSessionFactory {
    pub fn new(deps: SessionDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl SessionFactory for FixedSessionFactory {
    async fn deps_for(&self, _user_id: DbId) -> Result<SessionDeps, MonitorError> {
        Ok(self.deps.clone())
    }
}

/// Registry tuning knobs.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Fixed cadence of the session loop.
    pub tick_interval: Duration,
    /// Upper bound on concurrently active sessions; `None` = unbounded.
    pub max_sessions: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(3),
            max_sessions: None,
        }
    }
}

/// Process-wide mapping from user id to at most one active session.
///
/// All mutation happens under the write lock, so two concurrent `start`
/// calls for the same user resolve to exactly one running session.
pub struct MonitorRegistry {
    sessions: RwLock<HashMap<DbId, MonitorSession>>,
    factory: Arc<dyn SessionFactory>,
    config: MonitorConfig,
    /// Master cancellation token; session tokens are children of it.
    cancel: CancellationToken,
}

impl MonitorRegistry {
    pub fn new(factory: Arc<dyn SessionFactory>, config: MonitorConfig) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            factory,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Start monitoring for `user_id`.
    ///
    /// Atomic: the write lock is held across the existence check, the
    /// factory call, and the insert, so concurrent starts cannot race a
    /// second loop into existence. A factory failure leaves the registry
    /// exactly as it was.
    pub async fn start(&self, user_id: DbId) -> Result<StartOutcome, MonitorError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&user_id) {
            return Ok(StartOutcome::AlreadyActive);
        }

        if let Some(cap) = self.config.max_sessions {
            if sessions.len() >= cap {
                return Err(MonitorError::CapacityExhausted(sessions.len()));
            }
        }

        let deps = self.factory.deps_for(user_id).await?;
        let session = MonitorSession::spawn(
            user_id,
            deps,
            self.config.tick_interval,
            self.cancel.child_token(),
        );
        sessions.insert(user_id, session);

        tracing::info!(user_id, "Monitoring session started");
        Ok(StartOutcome::Started)
    }

    /// Stop monitoring for `user_id`.
    ///
    /// The entry is removed before the session is joined, so a `status`
    /// call issued after `stop` returns always reports inactive, even if
    /// an in-flight tick is still finishing.
    pub async fn stop(&self, user_id: DbId) -> StopOutcome {
        let removed = self.sessions.write().await.remove(&user_id);
        match removed {
            Some(session) => {
                session.shutdown(SESSION_JOIN_TIMEOUT).await;
                tracing::info!(user_id, "Monitoring session stopped");
                StopOutcome::Stopped
            }
            None => StopOutcome::NotActive,
        }
    }

    /// Read-only status query; never blocks on session I/O.
    pub async fn status(&self, user_id: DbId) -> MonitorStatus {
        match self.sessions.read().await.get(&user_id) {
            Some(session) => MonitorStatus::Active(session.latest()),
            None => MonitorStatus::Inactive,
        }
    }

    /// Number of currently active sessions.
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Stop every session. Called once during application shutdown.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down monitor registry");
        self.cancel.cancel();

        let mut sessions = self.sessions.write().await;
        for (user_id, session) in sessions.drain() {
            tracing::debug!(user_id, "Draining session");
            session.shutdown(SESSION_JOIN_TIMEOUT).await;
        }

        tracing::info!("Monitor registry shut down complete");
    }
}

/// Errors surfaced by the registry.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Session construction failed; the registry state is unchanged.
    #[error("Failed to construct monitoring session: {0}")]
    Construction(String),

    /// The configured session cap has been reached.
    #[error("Monitoring capacity exhausted ({0} active sessions)")]
    CapacityExhausted(usize),
}
