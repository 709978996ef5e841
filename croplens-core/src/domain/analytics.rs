//! Aggregated analytics shapes returned by the backend

use serde::{Deserialize, Serialize};

/// Aggregated statistics for one sensor over a time window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: i64,
}

/// One point of the combined time-series chart
///
/// Each point carries the readings that happened to land in its time bucket;
/// a sensor with no reading in the bucket is simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<f64>,
}
