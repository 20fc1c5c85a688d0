//! Pipeline dependencies (using traits for testability)
//!
//! Central dependency container handed to use cases and enrichment stages.
//! Every external service sits behind a trait so the same code paths run
//! against the mocks in test_dependencies.rs.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use completion_client::{
    BatchCompletionRequest, BatchResultItem, BatchStatus, CompletionBatchClient,
};

use super::{
    BaseBatchJobStore, BaseCompletionBatch, BaseGeocoder, BaseImageGallery,
    BaseLocationIntelligence, BaseTranslator, BaseTripStore, Diagnostics,
};

// =============================================================================
// CompletionBatchClient adapter (implements BaseCompletionBatch trait)
// =============================================================================

/// Wrapper lifting the concrete client's typed errors into `anyhow`.
pub struct CompletionBatchAdapter(pub Arc<CompletionBatchClient>);

impl CompletionBatchAdapter {
    pub fn new(client: Arc<CompletionBatchClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseCompletionBatch for CompletionBatchAdapter {
    async fn submit_batch(&self, requests: &[BatchCompletionRequest]) -> Result<String> {
        self.0
            .submit_batch(requests)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn poll_batch(&self, batch_id: &str) -> Result<BatchStatus> {
        self.0
            .poll_batch(batch_id)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn fetch_results(&self, batch_id: &str) -> Result<Vec<BatchResultItem>> {
        self.0
            .fetch_results(batch_id)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// PipelineDeps
// =============================================================================

/// Pipeline dependencies accessible to use cases and stages.
#[derive(Clone)]
pub struct PipelineDeps {
    pub trip_store: Arc<dyn BaseTripStore>,
    pub intelligence: Arc<dyn BaseLocationIntelligence>,
    pub gallery: Arc<dyn BaseImageGallery>,
    pub geocoder: Arc<dyn BaseGeocoder>,
    pub translator: Arc<dyn BaseTranslator>,
    pub completion: Arc<dyn BaseCompletionBatch>,
    pub job_store: Arc<dyn BaseBatchJobStore>,
    pub diagnostics: Arc<Diagnostics>,
}

impl PipelineDeps {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trip_store: Arc<dyn BaseTripStore>,
        intelligence: Arc<dyn BaseLocationIntelligence>,
        gallery: Arc<dyn BaseImageGallery>,
        geocoder: Arc<dyn BaseGeocoder>,
        translator: Arc<dyn BaseTranslator>,
        completion: Arc<dyn BaseCompletionBatch>,
        job_store: Arc<dyn BaseBatchJobStore>,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        Self {
            trip_store,
            intelligence,
            gallery,
            geocoder,
            translator,
            completion,
            job_store,
            diagnostics,
        }
    }
}
