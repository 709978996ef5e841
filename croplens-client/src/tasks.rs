//! Background task endpoints

use tracing::debug;

use crate::ApiClient;
use crate::error::Result;
use croplens_core::dto::task::TaskStatusResponse;

impl ApiClient {
    /// Get the status of a background task
    ///
    /// # Arguments
    /// * `task_id` - Opaque task id returned by the bulk upload endpoint
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let url = format!("{}/api/v1/tasks/{}", self.base_url, task_id);
        debug!(%url, "fetching task status");

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
