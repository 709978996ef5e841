//! Dashboard command
//!
//! Runs one aggregation cycle and renders the stat cards and chart table.
//! Unavailable sources render as N/A; they never abort the command.

use std::sync::Arc;

use anyhow::Result;
use colored::*;

use croplens_client::ApiClient;
use croplens_core::domain::analytics::AnalyticsSummary;
use croplens_dashboard::{AggregationSnapshot, Config, DataAggregator, SourceSlot};

/// Fetch and render the dashboard data
pub async fn handle_dashboard(config: &Config) -> Result<()> {
    let client = Arc::new(ApiClient::new(config.base_url.clone()));
    let aggregator = DataAggregator::new(client, config.field_id, config.chart_hours);

    let snapshot = aggregator.refresh().await;
    render_snapshot(&snapshot);
    Ok(())
}

/// Render a snapshot, partial or complete
pub fn render_snapshot(snapshot: &AggregationSnapshot) {
    println!("{}", "Field dashboard".bold());
    println!();
    print_stat("Avg. Temp", &snapshot.temperature, "°C");
    print_stat("Avg. Moisture", &snapshot.soil_moisture, "%");
    println!();

    match &snapshot.chart {
        SourceSlot::Ready(points) if !points.is_empty() => {
            println!("{}", "Sensor readings:".bold());
            println!(
                "  {:>5}  {:>12}  {:>12}",
                "time", "temperature", "moisture"
            );
            for point in points {
                println!(
                    "  {:>5}  {:>12}  {:>12}",
                    point.time,
                    fmt_value(point.temperature),
                    fmt_value(point.soil_moisture)
                );
            }
        }
        SourceSlot::Ready(_) => println!("{}", "No readings in the chart window.".yellow()),
        SourceSlot::Unavailable => println!("{}", "Chart data unavailable.".yellow()),
        SourceSlot::Loading => println!("{}", "Chart data still loading.".yellow()),
    }
}

fn print_stat(label: &str, slot: &SourceSlot<AnalyticsSummary>, unit: &str) {
    match slot {
        SourceSlot::Ready(summary) => println!(
            "  {:<14} {:.1} {} ({} readings, min {:.1}, max {:.1})",
            label, summary.avg, unit, summary.count, summary.min, summary.max
        ),
        _ => println!("  {:<14} {}", label, "N/A".yellow()),
    }
}

fn fmt_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "-".to_string())
}
