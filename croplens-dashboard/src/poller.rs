//! Task poller
//!
//! Follows one background job to a terminal outcome by querying its status
//! at a fixed interval. Each job gets exactly one poller; the poller owns the
//! job record and nothing else mutates it.
//!
//! Poll ticks are strictly sequential: a new status query is never issued
//! while the previous one is still in flight, so a slow response delays the
//! next tick instead of stacking requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::JobApi;
use crate::notify::NotificationSink;
use croplens_core::domain::job::Job;
use croplens_core::dto::task::TaskState;

/// Callback invoked exactly once when a job completes successfully
///
/// Consumers typically wire this to the aggregator's refresh trigger.
pub type DataChanged = Arc<dyn Fn() + Send + Sync>;

/// Observable poller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// Actively querying the status endpoint
    Polling,
    /// Job reported success
    Succeeded,
    /// Job ran and reported failure
    Failed,
    /// The status endpoint became unreachable; job outcome unknown
    StatusUnavailable,
    /// Polling was cancelled by the caller
    Cancelled,
}

impl PollerState {
    /// Whether the poller has stopped for good
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollerState::Polling)
    }
}

/// Terminal outcome of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    Failed,
    StatusUnavailable,
    Cancelled,
}

impl From<PollOutcome> for PollerState {
    fn from(outcome: PollOutcome) -> Self {
        match outcome {
            PollOutcome::Succeeded => PollerState::Succeeded,
            PollOutcome::Failed => PollerState::Failed,
            PollOutcome::StatusUnavailable => PollerState::StatusUnavailable,
            PollOutcome::Cancelled => PollerState::Cancelled,
        }
    }
}

/// Handle to a running poll loop
///
/// Construction starts polling immediately. Dropping the handle does not
/// stop the loop; call [`cancel`](Self::cancel) to tear it down.
pub struct TaskPoller {
    task_id: String,
    cancel: CancellationToken,
    state: watch::Receiver<PollerState>,
    handle: JoinHandle<PollOutcome>,
}

impl TaskPoller {
    /// Spawns a poller for the given task id
    ///
    /// # Arguments
    /// * `api` - Status endpoint access
    /// * `sink` - Receiver of progress and terminal notifications
    /// * `on_data_changed` - Invoked exactly once if the job succeeds
    /// * `task_id` - Id of the background task to follow
    /// * `interval` - Time between status queries
    pub fn spawn(
        api: Arc<dyn JobApi>,
        sink: Arc<dyn NotificationSink>,
        on_data_changed: DataChanged,
        task_id: impl Into<String>,
        interval: Duration,
    ) -> Self {
        let task_id = task_id.into();
        let cancel = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(PollerState::Polling);

        let handle = tokio::spawn(poll_loop(
            api,
            sink,
            on_data_changed,
            task_id.clone(),
            interval,
            cancel.clone(),
            state_tx,
        ));

        Self {
            task_id,
            cancel,
            state: state_rx,
            handle,
        }
    }

    /// Id of the task this poller follows
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Watch channel carrying the current poller state
    pub fn state(&self) -> watch::Receiver<PollerState> {
        self.state.clone()
    }

    /// Stops polling
    ///
    /// Safe to call multiple times and from any state; cancelling an already
    /// terminal poller is a no-op. An in-flight status query is abandoned
    /// and its result produces no notification.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the poll loop to finish and returns its outcome
    pub async fn join(self) -> PollOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            // The loop only ends by returning an outcome; a join error means
            // the task was aborted externally.
            Err(_) => PollOutcome::Cancelled,
        }
    }
}

async fn poll_loop(
    api: Arc<dyn JobApi>,
    sink: Arc<dyn NotificationSink>,
    on_data_changed: DataChanged,
    task_id: String,
    interval: Duration,
    cancel: CancellationToken,
    state_tx: watch::Sender<PollerState>,
) -> PollOutcome {
    let mut job = Job::new(task_id.clone());
    let mut ticker = time::interval(interval);
    // A slow response pushes the next tick back instead of bursting to
    // catch up; combined with awaiting the query inline this guarantees at
    // most one in-flight status request.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let outcome = loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%task_id, "polling cancelled before tick");
                break PollOutcome::Cancelled;
            }
            _ = ticker.tick() => {}
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%task_id, "polling cancelled with query in flight");
                break PollOutcome::Cancelled;
            }
            response = api.task_status(&task_id) => response,
        };

        match response {
            Ok(status) => match status.status {
                TaskState::Success => {
                    info!(%task_id, "job succeeded");
                    sink.job_succeeded(&task_id);
                    on_data_changed();
                    break PollOutcome::Succeeded;
                }
                TaskState::Failure => {
                    warn!(%task_id, "job failed");
                    sink.job_failed(&task_id);
                    break PollOutcome::Failed;
                }
                state => {
                    job.apply(state.into(), status.result.map(Into::into));
                    debug!(%task_id, percent = ?job.percent(), "job in progress");
                    sink.job_progress(&task_id, job.percent());
                }
            },
            Err(error) => {
                // The job may still be running server-side; all we know is
                // that we can no longer observe it. No per-tick retry.
                warn!(%task_id, %error, "status endpoint unreachable, giving up");
                sink.status_unavailable(&task_id);
                break PollOutcome::StatusUnavailable;
            }
        }
    };

    let _ = state_tx.send(outcome.into());
    outcome
}
