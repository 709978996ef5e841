//! Bulk upload command
//!
//! Reads a CSV, submits it as a background job, follows the job to a
//! terminal outcome, and re-renders the dashboard once the new data landed.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio::sync::mpsc;

use crate::commands::dashboard::render_snapshot;
use crate::console::ConsoleSink;
use croplens_client::ApiClient;
use croplens_dashboard::{
    BulkUpload, Config, DataAggregator, DataChanged, JobSubmitter, NotificationSink, PollOutcome,
};

/// Upload a readings file and wait for the processing job
pub async fn handle_upload(file: &Path, config: &Config) -> Result<()> {
    let contents = std::fs::read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let client = Arc::new(ApiClient::new(config.base_url.clone()));
    let sink: Arc<dyn NotificationSink> = Arc::new(ConsoleSink);

    // The poller signals "data changed" exactly once on success; the signal
    // drives a dashboard re-fetch below.
    let (refresh_tx, mut refresh_rx) = mpsc::channel(1);
    let on_data_changed: DataChanged = Arc::new(move || {
        let _ = refresh_tx.try_send(());
    });

    let submitter = JobSubmitter::new(
        Arc::clone(&client) as Arc<dyn croplens_dashboard::JobApi>,
        sink,
        on_data_changed,
        config.poll_interval,
    );
    let poller = submitter
        .submit(BulkUpload::new(filename, contents))
        .await?;

    match poller.join().await {
        PollOutcome::Succeeded => {
            if refresh_rx.try_recv().is_ok() {
                let aggregator =
                    DataAggregator::new(client, config.field_id, config.chart_hours);
                let snapshot = aggregator.refresh().await;
                println!();
                render_snapshot(&snapshot);
            }
            Ok(())
        }
        PollOutcome::Failed => bail!("file processing failed"),
        PollOutcome::StatusUnavailable => {
            bail!("could not get task status; the job may still be running")
        }
        PollOutcome::Cancelled => Ok(()),
    }
}
