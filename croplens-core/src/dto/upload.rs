//! Bulk upload DTOs

use serde::{Deserialize, Serialize};

/// Response of the bulk upload endpoint
///
/// The backend accepts the file, schedules a background task, and answers
/// with the id to poll for status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUploadAccepted {
    pub task_id: String,
}
