//! CropLens CLI
//!
//! Command-line interface for the CropLens field dashboard: upload bulk
//! sensor readings and track their processing, submit single readings, and
//! render the aggregated dashboard data.

mod commands;
mod console;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use croplens_dashboard::Config;

#[derive(Parser)]
#[command(name = "croplens")]
#[command(about = "CropLens field dashboard CLI", long_about = None)]
struct Cli {
    /// Backend API URL
    #[arg(
        long,
        env = "CROPLENS_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    /// Field to operate on
    #[arg(long, env = "CROPLENS_FIELD_ID", default_value_t = 1)]
    field_id: i64,

    /// Poll interval for background tasks, in milliseconds
    #[arg(long, env = "CROPLENS_POLL_INTERVAL_MS", default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Trailing chart window, in hours
    #[arg(long, env = "CROPLENS_CHART_HOURS", default_value_t = 24)]
    chart_hours: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "croplens_cli=info,croplens_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::new(cli.api_url);
    config.field_id = cli.field_id;
    config.poll_interval = Duration::from_millis(cli.poll_interval_ms);
    config.chart_hours = cli.chart_hours;
    config.validate()?;

    handle_command(cli.command, &config).await
}
