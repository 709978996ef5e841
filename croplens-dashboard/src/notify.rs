//! User-facing notifications
//!
//! Components receive an explicit [`NotificationSink`] capability instead of
//! writing to ambient global state. The sink is the seam between the
//! orchestration core and whatever presentation layer consumes it (console
//! output, a UI toast system, test recorders).

/// Receiver of job and submission events
///
/// Methods are synchronous and must not block; implementations that need I/O
/// should hand the event off to their own channel.
pub trait NotificationSink: Send + Sync {
    /// A bulk submission was accepted and a background task created
    fn submission_accepted(&self, task_id: &str);

    /// A bulk submission was rejected; no task was created
    fn submission_rejected(&self, reason: &str);

    /// A polled job reported progress
    ///
    /// `percent` is `None` when the job cannot report a meaningful
    /// percentage (e.g. total units unknown or zero).
    fn job_progress(&self, task_id: &str, percent: Option<u8>);

    /// The job completed successfully
    fn job_succeeded(&self, task_id: &str);

    /// The job ran and reported failure
    fn job_failed(&self, task_id: &str);

    /// The status endpoint could not be reached; the job's true outcome is
    /// unknown. Deliberately distinct from [`job_failed`](Self::job_failed).
    fn status_unavailable(&self, task_id: &str);
}

/// Sink that discards every event
///
/// Useful for headless use and as a default in tests.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn submission_accepted(&self, _task_id: &str) {}
    fn submission_rejected(&self, _reason: &str) {}
    fn job_progress(&self, _task_id: &str, _percent: Option<u8>) {}
    fn job_succeeded(&self, _task_id: &str) {}
    fn job_failed(&self, _task_id: &str) {}
    fn status_unavailable(&self, _task_id: &str) {}
}
