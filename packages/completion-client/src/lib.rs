//! Pure REST client for the completion batch service.
//!
//! A minimal client for the asynchronous batch-completion API with no domain
//! logic. One batch carries many independent completion requests; the service
//! returns a single opaque batch id, works through the entries offline, and
//! exposes per-entry results keyed by `custom_id`.
//!
//! # Example
//!
//! ```rust,ignore
//! use completion_client::{BatchCompletionRequest, CompletionBatchClient, CompletionBody};
//!
//! let client = CompletionBatchClient::from_env()?;
//!
//! let batch_id = client
//!     .submit_batch(&[BatchCompletionRequest {
//!         custom_id: "trip-1".into(),
//!         body: CompletionBody::structured("gpt-4o-mini", sys, user, "draft", schema),
//!     }])
//!     .await?;
//!
//! // Later, from the poller:
//! let status = client.poll_batch(&batch_id).await?;
//! if status.is_terminal() {
//!     let results = client.fetch_results(&batch_id).await?;
//! }
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{CompletionError, Result};
pub use schema::StrictSchema;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Client for the completion batch service.
#[derive(Clone)]
pub struct CompletionBatchClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl CompletionBatchClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `COMPLETION_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("COMPLETION_API_KEY")
            .map_err(|_| CompletionError::Config("COMPLETION_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (proxies, compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a set of completion requests as one batch.
    ///
    /// Returns the opaque batch id covering the whole run. The call is
    /// fire-once: after the service accepts the batch it owns execution, and
    /// progress is observed via [`poll_batch`](Self::poll_batch).
    pub async fn submit_batch(&self, requests: &[BatchCompletionRequest]) -> Result<String> {
        if requests.is_empty() {
            return Err(CompletionError::Api("Cannot submit an empty batch".into()));
        }

        let start = std::time::Instant::now();
        let body = types::SubmitBatchRequest { requests };

        let response = self
            .http_client
            .post(format!("{}/batches", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Batch submission request failed");
                CompletionError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Batch service rejected submission");
            return Err(CompletionError::Api(format!(
                "Batch submission error: {}",
                error_text
            )));
        }

        let submitted: types::SubmitBatchResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        debug!(
            batch_id = %submitted.id,
            request_count = requests.len(),
            duration_ms = start.elapsed().as_millis(),
            "Batch submitted"
        );

        Ok(submitted.id)
    }

    /// Poll the status of an in-flight batch.
    pub async fn poll_batch(&self, batch_id: &str) -> Result<BatchStatus> {
        let response = self
            .http_client
            .get(format!("{}/batches/{}", self.base_url, batch_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!(
                "Batch status error: {}",
                error_text
            )));
        }

        let status: types::BatchStatusResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        Ok(status.status)
    }

    /// Fetch per-entry results for a terminal batch.
    pub async fn fetch_results(&self, batch_id: &str) -> Result<Vec<BatchResultItem>> {
        let response = self
            .http_client
            .get(format!("{}/batches/{}/results", self.base_url, batch_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!(
                "Batch results error: {}",
                error_text
            )));
        }

        let results: types::BatchResultsResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        debug!(
            batch_id = %batch_id,
            result_count = results.results.len(),
            "Fetched batch results"
        );

        Ok(results.results)
    }
}
