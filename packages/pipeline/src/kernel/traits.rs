// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The pipeline's
// collaborators (trip store, intelligence, gallery, geocoder, translator,
// completion batch service, job store) all sit behind these so use cases and
// stages can be tested against the mocks in test_dependencies.rs.
//
// Naming convention: Base* for trait names (e.g., BaseTripStore)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    BatchJob, BatchJobStatus, Coordinates, LocationIntelligence, TripBundle,
};
use completion_client::{BatchCompletionRequest, BatchResultItem, BatchStatus};

// =============================================================================
// Trip store (read side of the main application's relational store)
// =============================================================================

#[async_trait]
pub trait BaseTripStore: Send + Sync {
    /// Fetch one trip with its posts and itinerary rows.
    async fn fetch_trip_bundle(&self, trip_id: Uuid) -> Result<TripBundle>;
}

// =============================================================================
// Location intelligence
// =============================================================================

#[async_trait]
pub trait BaseLocationIntelligence: Send + Sync {
    /// POIs and suggested activities for a destination.
    async fn get_intelligence(&self, destination: &str) -> Result<LocationIntelligence>;
}

// =============================================================================
// Image gallery
// =============================================================================

#[async_trait]
pub trait BaseImageGallery: Send + Sync {
    /// Fetch up to `count` image URLs for a destination, best-effort ordered.
    async fn fetch_gallery(&self, destination: &str, count: usize) -> Result<Vec<String>>;
}

// =============================================================================
// Geocoding
// =============================================================================

#[async_trait]
pub trait BaseGeocoder: Send + Sync {
    /// Resolve a place name to coordinates; `None` when the place is unknown.
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>>;
}

// =============================================================================
// Translation
// =============================================================================

#[async_trait]
pub trait BaseTranslator: Send + Sync {
    /// Translate text toward the target script (Latin when `None`).
    async fn translate(&self, text: &str, target_script: Option<&str>) -> Result<String>;
}

// =============================================================================
// Completion batch service
// =============================================================================

#[async_trait]
pub trait BaseCompletionBatch: Send + Sync {
    /// Submit all requests as one batch; returns the opaque batch id.
    async fn submit_batch(&self, requests: &[BatchCompletionRequest]) -> Result<String>;

    /// Poll the batch status (used by the out-of-core poller).
    async fn poll_batch(&self, batch_id: &str) -> Result<BatchStatus>;

    /// Fetch per-entry results for a terminal batch.
    async fn fetch_results(&self, batch_id: &str) -> Result<Vec<BatchResultItem>>;
}

// =============================================================================
// Batch job persistence
// =============================================================================

#[async_trait]
pub trait BaseBatchJobStore: Send + Sync {
    async fn save(&self, job: &BatchJob) -> Result<()>;

    async fn update_status(&self, id: Uuid, status: BatchJobStatus) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BatchJob>>;
}
