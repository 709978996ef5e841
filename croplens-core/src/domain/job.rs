//! Job domain types
//!
//! A [`Job`] is a server-tracked unit of background work (e.g. a bulk CSV
//! import) identified by an opaque id handed out at submission time. The
//! client never creates job ids itself; it only mirrors what the status
//! endpoint reports.

use serde::{Deserialize, Serialize};

/// Client-side view of a background job
///
/// Created on successful submission and mutated only by poll responses.
/// Dropped once the job reaches a terminal status or polling is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub progress: Option<JobProgress>,
}

/// Job lifecycle status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed,
}

/// Unit-count progress of a running job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProgress {
    pub completed_units: u64,
    pub total_units: u64,
}

impl Job {
    /// Creates a new job record in its initial state
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Pending,
            progress: None,
        }
    }

    /// Applies a poll response to this job
    ///
    /// Progress is only updated when the response actually carried progress
    /// data; a bare status update keeps the last known counts.
    pub fn apply(&mut self, status: JobStatus, progress: Option<JobProgress>) {
        self.status = status;
        if progress.is_some() {
            self.progress = progress;
        }
    }

    /// Whether the job has reached a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Completion percentage of the last known progress, if computable
    pub fn percent(&self) -> Option<u8> {
        self.progress.as_ref().and_then(JobProgress::percent)
    }
}

impl JobProgress {
    /// Completion percentage rounded to the nearest integer
    ///
    /// Returns `None` when `total_units` is zero (indeterminate progress,
    /// never a division fault). The result is clamped to 100 so a server
    /// overshoot cannot produce an out-of-range percentage.
    pub fn percent(&self) -> Option<u8> {
        if self.total_units == 0 {
            return None;
        }
        let ratio = self.completed_units as f64 / self.total_units as f64;
        Some((ratio * 100.0).round().min(100.0) as u8)
    }
}
