//! Remote operation ports
//!
//! The poller, submitter, and aggregator talk to the backend through these
//! traits rather than a concrete client, so tests can substitute scripted
//! implementations. [`croplens_client::ApiClient`] is the production
//! implementation of both.

use async_trait::async_trait;

use croplens_client::{ApiClient, ClientError};
use croplens_core::domain::analytics::{AnalyticsSummary, ChartPoint};
use croplens_core::domain::reading::SensorKind;
use croplens_core::dto::task::TaskStatusResponse;
use croplens_core::dto::upload::BulkUploadAccepted;

/// Operations used for job submission and tracking
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Upload a readings file for background processing
    async fn upload_bulk(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadAccepted, ClientError>;

    /// Query the status of a background task
    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, ClientError>;
}

/// Operations used for dashboard data aggregation
#[async_trait]
pub trait DataApi: Send + Sync {
    /// Fetch aggregated stats for one sensor of a field
    async fn analytics(
        &self,
        field_id: i64,
        sensor: SensorKind,
    ) -> Result<AnalyticsSummary, ClientError>;

    /// Fetch combined time-series data for the chart
    async fn chart_data(&self, field_id: i64, hours: u32) -> Result<Vec<ChartPoint>, ClientError>;
}

#[async_trait]
impl JobApi for ApiClient {
    async fn upload_bulk(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadAccepted, ClientError> {
        ApiClient::upload_bulk(self, filename, contents).await
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, ClientError> {
        ApiClient::task_status(self, task_id).await
    }
}

#[async_trait]
impl DataApi for ApiClient {
    async fn analytics(
        &self,
        field_id: i64,
        sensor: SensorKind,
    ) -> Result<AnalyticsSummary, ClientError> {
        ApiClient::analytics(self, field_id, sensor).await
    }

    async fn chart_data(&self, field_id: i64, hours: u32) -> Result<Vec<ChartPoint>, ClientError> {
        ApiClient::chart_data(self, field_id, hours).await
    }
}
