//! Analytics and chart data endpoints

use tracing::debug;

use crate::ApiClient;
use crate::error::Result;
use croplens_core::domain::analytics::{AnalyticsSummary, ChartPoint};
use croplens_core::domain::reading::SensorKind;

impl ApiClient {
    /// Get aggregated statistics for one sensor of a field
    ///
    /// The backend answers 404 when the field has no readings for that
    /// sensor yet; callers decide whether that counts as an error.
    pub async fn analytics(&self, field_id: i64, sensor: SensorKind) -> Result<AnalyticsSummary> {
        let url = format!("{}/api/v1/analytics", self.base_url);
        debug!(%url, field_id, sensor = %sensor, "fetching analytics");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("field_id", field_id.to_string()),
                ("sensor_type", sensor.as_str().to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get combined time-series data for the chart
    ///
    /// # Arguments
    /// * `field_id` - The field to chart
    /// * `hours` - Size of the trailing time window
    pub async fn chart_data(&self, field_id: i64, hours: u32) -> Result<Vec<ChartPoint>> {
        let url = format!("{}/api/v1/readings/chart", self.base_url);
        debug!(%url, field_id, hours, "fetching chart data");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("field_id", field_id.to_string()),
                ("hours", hours.to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
