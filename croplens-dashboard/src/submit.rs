//! Bulk upload submission
//!
//! Validates and uploads a readings file, then hands the returned task id to
//! exactly one [`TaskPoller`]. A rejected or failed submission creates no job
//! and starts no poller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::JobApi;
use crate::error::SubmitError;
use crate::notify::NotificationSink;
use crate::poller::{DataChanged, TaskPoller};

/// A readings file to upload
///
/// Immutable once constructed; the submitter consumes it.
#[derive(Debug, Clone)]
pub struct BulkUpload {
    pub filename: String,
    pub contents: Vec<u8>,
}

impl BulkUpload {
    pub fn new(filename: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            contents,
        }
    }
}

/// Submits bulk uploads and spawns their pollers
pub struct JobSubmitter {
    api: Arc<dyn JobApi>,
    sink: Arc<dyn NotificationSink>,
    on_data_changed: DataChanged,
    poll_interval: Duration,
}

impl JobSubmitter {
    pub fn new(
        api: Arc<dyn JobApi>,
        sink: Arc<dyn NotificationSink>,
        on_data_changed: DataChanged,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            sink,
            on_data_changed,
            poll_interval,
        }
    }

    /// Submit a bulk upload
    ///
    /// Emits exactly one submission notification: accepted (with the new
    /// task id) or rejected. On acceptance the returned poller is already
    /// running.
    ///
    /// The payload is validated for presence and file type only; content
    /// validation is the backend's job.
    pub async fn submit(&self, upload: BulkUpload) -> Result<TaskPoller, SubmitError> {
        if let Err(error) = validate(&upload) {
            warn!(filename = %upload.filename, %error, "rejecting upload before submission");
            self.sink.submission_rejected(&error.to_string());
            return Err(error);
        }

        match self.api.upload_bulk(&upload.filename, upload.contents).await {
            Ok(accepted) => {
                info!(task_id = %accepted.task_id, "bulk upload accepted");
                self.sink.submission_accepted(&accepted.task_id);

                Ok(TaskPoller::spawn(
                    Arc::clone(&self.api),
                    Arc::clone(&self.sink),
                    Arc::clone(&self.on_data_changed),
                    accepted.task_id,
                    self.poll_interval,
                ))
            }
            Err(error) => {
                warn!(%error, "bulk upload failed");
                let error = SubmitError::from(error);
                self.sink.submission_rejected(&error.to_string());
                Err(error)
            }
        }
    }
}

fn validate(upload: &BulkUpload) -> Result<(), SubmitError> {
    if upload.filename.is_empty() {
        return Err(SubmitError::MissingFilename);
    }
    if !upload.filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(SubmitError::UnsupportedFileType(upload.filename.clone()));
    }
    if upload.contents.is_empty() {
        return Err(SubmitError::EmptyPayload);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use croplens_client::ClientError;
    use croplens_core::dto::task::{TaskState, TaskStatusResponse};
    use croplens_core::dto::upload::BulkUploadAccepted;

    /// Job API whose upload either succeeds with a fixed task id or fails
    /// with a scripted error; status polls always report success so spawned
    /// pollers finish quickly.
    struct UploadApi {
        upload_error: Option<u16>,
        uploads: AtomicUsize,
    }

    impl UploadApi {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                upload_error: None,
                uploads: AtomicUsize::new(0),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                upload_error: Some(status),
                uploads: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl JobApi for UploadApi {
        async fn upload_bulk(
            &self,
            _filename: &str,
            _contents: Vec<u8>,
        ) -> Result<BulkUploadAccepted, ClientError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            match self.upload_error {
                Some(status) => Err(ClientError::api_error(status, "rejected")),
                None => Ok(BulkUploadAccepted {
                    task_id: "t1".to_string(),
                }),
            }
        }

        async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, ClientError> {
            Ok(TaskStatusResponse {
                task_id: task_id.to_string(),
                status: TaskState::Success,
                result: None,
            })
        }
    }

    struct RecordingSink {
        accepted: Mutex<Vec<String>>,
        rejected: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                accepted: Mutex::new(Vec::new()),
                rejected: Mutex::new(Vec::new()),
            })
        }
    }

    impl NotificationSink for RecordingSink {
        fn submission_accepted(&self, task_id: &str) {
            self.accepted.lock().unwrap().push(task_id.to_string());
        }
        fn submission_rejected(&self, reason: &str) {
            self.rejected.lock().unwrap().push(reason.to_string());
        }
        fn job_progress(&self, _task_id: &str, _percent: Option<u8>) {}
        fn job_succeeded(&self, _task_id: &str) {}
        fn job_failed(&self, _task_id: &str) {}
        fn status_unavailable(&self, _task_id: &str) {}
    }

    fn submitter(api: Arc<UploadApi>, sink: Arc<RecordingSink>) -> JobSubmitter {
        JobSubmitter::new(api, sink, Arc::new(|| {}), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_accepted_submission_spawns_poller() {
        let api = UploadApi::accepting();
        let sink = RecordingSink::new();
        let submitter = submitter(api.clone(), sink.clone());

        let poller = submitter
            .submit(BulkUpload::new("readings.csv", b"field_id,value\n".to_vec()))
            .await
            .unwrap();

        assert_eq!(poller.task_id(), "t1");
        assert_eq!(*sink.accepted.lock().unwrap(), vec!["t1".to_string()]);
        assert!(sink.rejected.lock().unwrap().is_empty());

        poller.join().await;
    }

    #[tokio::test]
    async fn test_empty_payload_is_rejected_locally() {
        let api = UploadApi::accepting();
        let sink = RecordingSink::new();
        let submitter = submitter(api.clone(), sink.clone());

        let result = submitter
            .submit(BulkUpload::new("readings.csv", Vec::new()))
            .await;

        assert!(matches!(result, Err(SubmitError::EmptyPayload)));
        // Never reached the backend, no task created.
        assert_eq!(api.uploads.load(Ordering::SeqCst), 0);
        assert_eq!(sink.rejected.lock().unwrap().len(), 1);
        assert!(sink.accepted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_csv_file_is_rejected_locally() {
        let api = UploadApi::accepting();
        let sink = RecordingSink::new();
        let submitter = submitter(api.clone(), sink.clone());

        let result = submitter
            .submit(BulkUpload::new("readings.xlsx", b"data".to_vec()))
            .await;

        assert!(matches!(result, Err(SubmitError::UnsupportedFileType(_))));
        assert_eq!(api.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_rejection_maps_to_rejected() {
        let api = UploadApi::failing(400);
        let sink = RecordingSink::new();
        let submitter = submitter(api, sink.clone());

        let result = submitter
            .submit(BulkUpload::new("readings.csv", b"data".to_vec()))
            .await;

        assert!(matches!(result, Err(SubmitError::Rejected(_))));
        assert_eq!(sink.rejected.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backend_error_maps_to_transport() {
        let api = UploadApi::failing(502);
        let sink = RecordingSink::new();
        let submitter = submitter(api, sink.clone());

        let result = submitter
            .submit(BulkUpload::new("readings.csv", b"data".to_vec()))
            .await;

        assert!(matches!(result, Err(SubmitError::Transport(_))));
        assert_eq!(sink.rejected.lock().unwrap().len(), 1);
    }
}
