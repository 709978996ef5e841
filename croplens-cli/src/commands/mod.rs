//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dashboard;
mod reading;
mod upload;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use croplens_dashboard::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a CSV of sensor readings and track the processing job
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Submit a single sensor reading
    Reading {
        /// Sensor type (temperature or soil_moisture)
        sensor: String,

        /// Measured value
        value: f64,

        /// Measurement unit (defaults to the sensor's standard unit)
        #[arg(long)]
        unit: Option<String>,
    },
    /// Fetch and render the aggregated dashboard data
    Dashboard,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Upload { file } => upload::handle_upload(&file, config).await,
        Commands::Reading {
            sensor,
            value,
            unit,
        } => reading::handle_reading(&sensor, value, unit, config).await,
        Commands::Dashboard => dashboard::handle_dashboard(config).await,
    }
}
