//! CropLens HTTP Client
//!
//! A typed HTTP client for the CropLens dashboard backend.
//!
//! This crate covers every backend operation the dashboard consumes: bulk
//! reading uploads (multipart), task status polling, single reading
//! submission, and the analytics/chart data fetches.
//!
//! # Example
//!
//! ```no_run
//! use croplens_client::ApiClient;
//! use croplens_core::domain::reading::SensorKind;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:8000");
//!
//!     let summary = client.analytics(1, SensorKind::Temperature).await?;
//!     println!("avg temperature: {:.1}", summary.avg);
//!     Ok(())
//! }
//! ```

pub mod error;
mod analytics;
mod sensors;
mod tasks;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the CropLens backend API
///
/// Endpoint methods are grouped into modules by concern:
/// - Sensors: single reading submission and bulk CSV upload
/// - Tasks: background task status
/// - Analytics: aggregated stats and chart data
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Example
    /// ```
    /// use croplens_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create an API client with a custom HTTP client
    ///
    /// Allows configuring timeouts, proxies, TLS settings, etc. The core
    /// relies on the transport timeout configured here; it applies none of
    /// its own.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body the caller does not need
    pub(crate) async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
