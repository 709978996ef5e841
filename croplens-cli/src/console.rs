//! Console notification sink

use colored::*;

use croplens_dashboard::NotificationSink;

/// Prints job and submission events to the terminal
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn submission_accepted(&self, task_id: &str) {
        println!(
            "{} task {}",
            "File sent for processing:".green(),
            task_id.bold()
        );
    }

    fn submission_rejected(&self, reason: &str) {
        println!("{} {}", "Upload rejected:".red().bold(), reason);
    }

    fn job_progress(&self, _task_id: &str, percent: Option<u8>) {
        match percent {
            Some(percent) => println!("Processing... {}%", percent),
            None => println!("Processing..."),
        }
    }

    fn job_succeeded(&self, _task_id: &str) {
        println!("{}", "File processed successfully!".green().bold());
    }

    fn job_failed(&self, _task_id: &str) {
        println!("{}", "File processing failed.".red().bold());
    }

    fn status_unavailable(&self, _task_id: &str) {
        println!(
            "{}",
            "Could not get task status; the job's outcome is unknown."
                .yellow()
                .bold()
        );
    }
}
