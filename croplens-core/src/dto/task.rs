//! Task status DTOs
//!
//! Shapes returned by `GET /api/v1/tasks/{task_id}`. The backend forwards
//! Celery task state verbatim, so the state set is open-ended: besides the
//! four states the dashboard acts on, transient states such as `STARTED` or
//! `RETRY` can appear and are treated as still running.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::job::{JobProgress, JobStatus};

/// Background task state on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Pending,
    Progress,
    Success,
    Failure,
    /// Any state the dashboard does not act on; treated as still running
    #[serde(other)]
    Other,
}

impl TaskState {
    /// Whether this state ends the task's lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failure)
    }
}

impl From<TaskState> for JobStatus {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Pending => JobStatus::Pending,
            TaskState::Progress | TaskState::Other => JobStatus::InProgress,
            TaskState::Success => JobStatus::Succeeded,
            TaskState::Failure => JobStatus::Failed,
        }
    }
}

/// Unit counts reported while a task is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub current: u64,
    pub total: u64,
}

impl From<TaskProgress> for JobProgress {
    fn from(progress: TaskProgress) -> Self {
        JobProgress {
            completed_units: progress.current,
            total_units: progress.total,
        }
    }
}

/// Response of the task status endpoint
///
/// `result` is only meaningful while the task reports progress. The backend
/// forwards Celery's `result` field verbatim, so terminal responses may omit
/// it or carry a different payload entirely (failure responses hold error
/// meta like `{"exc_type", "exc_message"}`). Anything that is not
/// progress-shaped deserializes to `None` instead of failing the whole
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: TaskState,
    #[serde(default, deserialize_with = "progress_or_none")]
    pub result: Option<TaskProgress>,
}

fn progress_or_none<'de, D>(deserializer: D) -> Result<Option<TaskProgress>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_progress_response() {
        let response: TaskStatusResponse = serde_json::from_str(
            r#"{"task_id": "t1", "status": "PROGRESS", "result": {"current": 10, "total": 50}}"#,
        )
        .unwrap();

        assert_eq!(response.status, TaskState::Progress);
        let progress: JobProgress = response.result.unwrap().into();
        assert_eq!(progress.percent(), Some(20));
    }

    #[test]
    fn test_parses_terminal_response_without_result() {
        let response: TaskStatusResponse =
            serde_json::from_str(r#"{"task_id": "t1", "status": "SUCCESS"}"#).unwrap();

        assert_eq!(response.status, TaskState::Success);
        assert!(response.status.is_terminal());
        assert!(response.result.is_none());
    }

    #[test]
    fn test_failure_error_meta_is_not_progress() {
        let response: TaskStatusResponse = serde_json::from_str(
            r#"{"task_id": "t1", "status": "FAILURE", "result": {"exc_type": "ValueError", "exc_message": "bad row"}}"#,
        )
        .unwrap();

        assert_eq!(response.status, TaskState::Failure);
        assert!(response.result.is_none());
    }

    #[test]
    fn test_non_object_result_is_ignored() {
        let response: TaskStatusResponse = serde_json::from_str(
            r#"{"task_id": "t1", "status": "FAILURE", "result": {"status": "Failed"}}"#,
        )
        .unwrap();
        assert!(response.result.is_none());

        let response: TaskStatusResponse =
            serde_json::from_str(r#"{"task_id": "t1", "status": "SUCCESS", "result": null}"#)
                .unwrap();
        assert!(response.result.is_none());
    }

    #[test]
    fn test_unknown_state_is_non_terminal() {
        let response: TaskStatusResponse =
            serde_json::from_str(r#"{"task_id": "t1", "status": "STARTED"}"#).unwrap();

        assert_eq!(response.status, TaskState::Other);
        assert!(!response.status.is_terminal());
        assert_eq!(JobStatus::from(response.status), JobStatus::InProgress);
    }
}
