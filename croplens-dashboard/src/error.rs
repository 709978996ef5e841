//! Error types for the orchestration layer

use thiserror::Error;

use croplens_client::ClientError;

/// Errors from submitting a bulk upload
///
/// A failed submission never creates a job and never starts a poller.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Upload payload was empty
    #[error("upload payload is empty")]
    EmptyPayload,

    /// Upload had no file name
    #[error("upload file name is missing")]
    MissingFilename,

    /// Only CSV files are accepted by the bulk endpoint
    #[error("unsupported file type '{0}', expected a .csv file")]
    UnsupportedFileType(String),

    /// The backend rejected the payload (4xx)
    #[error("submission rejected: {0}")]
    Rejected(ClientError),

    /// The upload could not reach the backend or the backend errored (5xx)
    #[error("submission transport error: {0}")]
    Transport(ClientError),
}

impl From<ClientError> for SubmitError {
    fn from(error: ClientError) -> Self {
        if error.is_client_error() {
            SubmitError::Rejected(error)
        } else {
            SubmitError::Transport(error)
        }
    }
}
