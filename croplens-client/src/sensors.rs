//! Sensor ingestion endpoints

use reqwest::multipart;
use tracing::debug;

use crate::ApiClient;
use crate::error::Result;
use croplens_core::domain::reading::SensorReading;
use croplens_core::dto::upload::BulkUploadAccepted;

impl ApiClient {
    /// Submit a single sensor reading
    ///
    /// The backend echoes the stored reading back; the dashboard only needs
    /// the acknowledgment, so the body is discarded.
    pub async fn create_reading(&self, reading: &SensorReading) -> Result<()> {
        let url = format!("{}/api/v1/sensors", self.base_url);
        debug!(%url, sensor = %reading.sensor_type, "submitting sensor reading");

        let response = self.client.post(&url).json(reading).send().await?;

        self.handle_empty_response(response).await
    }

    /// Upload a CSV of sensor readings for background processing
    ///
    /// Sends the file as a multipart form. The backend responds with 202 and
    /// the id of the background task to poll.
    ///
    /// # Arguments
    /// * `filename` - Original file name (the backend checks the extension)
    /// * `contents` - Raw file bytes
    pub async fn upload_bulk(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadAccepted> {
        let url = format!("{}/api/v1/sensors/bulk", self.base_url);
        debug!(%url, filename, bytes = contents.len(), "uploading bulk readings");

        let part = multipart::Part::bytes(contents)
            .file_name(filename.to_string())
            .mime_str("text/csv")?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        self.handle_response(response).await
    }
}
