//! A single user's monitoring session: one spawned task running the
//! read-classify-persist-broadcast loop until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use pulsewatch_core::classify::Classifier;
use pulsewatch_core::types::DbId;
use pulsewatch_events::{EventBus, MonitorUpdate};

use crate::feed::LiveFeed;
use crate::sink::PredictionSink;
use crate::snapshot::MonitorSnapshot;

/// Constructor-injected collaborators for one session.
///
/// The classifier and event bus are optional: without a classifier the
/// session runs in collect-only mode, without a bus nothing is broadcast.
/// Feed and sink are always bound.
#[derive(Clone)]
pub struct SessionDeps {
    pub feed: Arc<dyn LiveFeed>,
    pub classifier: Option<Arc<dyn Classifier>>,
    pub sink: Arc<dyn PredictionSink>,
    pub events: Option<Arc<EventBus>>,
}

/// Handle to a running monitoring session.
///
/// The loop itself runs on its own tokio task; this handle carries the
/// cancellation token, the join handle, and the receiver half of the
/// snapshot channel. Dropping the handle does not stop the loop; the
/// registry owns the lifecycle.
pub struct MonitorSession {
    user_id: DbId,
    latest: watch::Receiver<MonitorSnapshot>,
    cancel: CancellationToken,
    task_handle: tokio::task::JoinHandle<()>,
}

impl MonitorSession {
    /// Spawn the session loop. The returned handle is immediately live;
    /// `latest()` serves the placeholder until the first tick completes.
    pub(crate) fn spawn(
        user_id: DbId,
        deps: SessionDeps,
        tick_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, rx) = watch::channel(MonitorSnapshot::placeholder());
        let loop_cancel = cancel.clone();

        let task_handle = tokio::spawn(async move {
            tracing::info!(user_id, tick_ms = tick_interval.as_millis() as u64, "Session loop started");
            run_session_loop(user_id, deps, tick_interval, tx, loop_cancel).await;
            tracing::info!(user_id, "Session loop exited");
        });

        Self {
            user_id,
            latest: rx,
            cancel,
            task_handle,
        }
    }

    pub fn user_id(&self) -> DbId {
        self.user_id
    }

    /// The most recent snapshot. Never blocks on the loop and never fails.
    pub fn latest(&self) -> MonitorSnapshot {
        self.latest.borrow().clone()
    }

    /// Cancel the loop and wait for it to exit, bounded by `timeout`.
    ///
    /// An in-flight tick is allowed to finish; a loop stuck inside a
    /// misbehaving feed or sink is aborted once the timeout elapses.
    pub(crate) async fn shutdown(self, timeout: Duration) {
        self.cancel.cancel();
        let abort = self.task_handle.abort_handle();
        if tokio::time::timeout(timeout, self.task_handle).await.is_err() {
            tracing::warn!(user_id = self.user_id, "Session did not exit in time, aborting");
            abort.abort();
        }
    }
}

/// The loop body: strictly sequential ticks with a cancellable wait.
///
/// Every per-tick fault is downgraded to a log line; nothing escapes.
async fn run_session_loop(
    user_id: DbId,
    deps: SessionDeps,
    tick_interval: Duration,
    tx: watch::Sender<MonitorSnapshot>,
    cancel: CancellationToken,
) {
    loop {
        if cancel.is_cancelled() {
            break;
        }

        run_tick(user_id, &deps, &tx).await;

        // Cancellation during the wait must not require waiting out the
        // full interval.
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(tick_interval) => {}
        }
    }
}

/// One tick: read, classify, persist, broadcast, publish snapshot.
async fn run_tick(user_id: DbId, deps: &SessionDeps, tx: &watch::Sender<MonitorSnapshot>) {
    let reading = match deps.feed.read().await {
        Ok(reading) => reading,
        Err(e) => {
            // Recoverable: skip this tick entirely, keep the loop alive.
            tracing::warn!(user_id, error = %e, "Feed read failed, skipping tick");
            return;
        }
    };

    let Some(classifier) = &deps.classifier else {
        // Collect-only mode: no classifier bound, snapshot cache only.
        tx.send_replace(MonitorSnapshot::collecting(&reading));
        return;
    };

    let classification = classifier.classify(&reading);

    if let Err(e) = deps.sink.persist(user_id, &reading, &classification).await {
        tracing::warn!(user_id, error = %e, "Prediction persist failed, continuing");
    }

    if let Some(events) = &deps.events {
        events.publish(MonitorUpdate::from_tick(user_id, &reading, &classification));
    }

    // Atomic publish: status() readers see either the previous snapshot
    // or this one, never a partial value.
    tx.send_replace(MonitorSnapshot::classified(&reading, &classification));
}
