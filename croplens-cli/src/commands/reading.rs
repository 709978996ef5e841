//! Single reading submission command

use anyhow::{Result, anyhow};
use colored::*;

use croplens_client::ApiClient;
use croplens_core::domain::reading::{SensorKind, SensorReading};
use croplens_dashboard::Config;

/// Submit one sensor reading
pub async fn handle_reading(
    sensor: &str,
    value: f64,
    unit: Option<String>,
    config: &Config,
) -> Result<()> {
    let kind: SensorKind = sensor.parse().map_err(|e: String| anyhow!(e))?;
    let client = ApiClient::new(config.base_url.clone());

    let mut reading = SensorReading::new(config.field_id, kind, value);
    if let Some(unit) = unit {
        reading.unit = unit;
    }

    client.create_reading(&reading).await?;

    println!(
        "{} {} {} {} for field {}",
        "Recorded".green().bold(),
        kind,
        value,
        reading.unit,
        config.field_id
    );
    Ok(())
}
