// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into PipelineDeps for tests.
// Every mock records its calls so tests can assert on fan-out behavior
// (memoization, short-circuits, partial failure).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use completion_client::{BatchCompletionRequest, BatchResultItem, BatchStatus};

use crate::domain::{Coordinates, LocationIntelligence, PointOfInterest, TripBundle};
use crate::store::InMemoryBatchJobStore;

use super::{
    BaseCompletionBatch, BaseGeocoder, BaseImageGallery, BaseLocationIntelligence, BaseTranslator,
    BaseTripStore, Diagnostics, PipelineDeps,
};

// =============================================================================
// Mock Trip Store
// =============================================================================

pub struct MockTripStore {
    bundles: Mutex<HashMap<Uuid, TripBundle>>,
    failing_ids: Mutex<HashSet<Uuid>>,
    fetch_calls: Arc<Mutex<Vec<Uuid>>>,
}

impl MockTripStore {
    pub fn new() -> Self {
        Self {
            bundles: Mutex::new(HashMap::new()),
            failing_ids: Mutex::new(HashSet::new()),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn insert(&self, bundle: TripBundle) {
        self.bundles.lock().unwrap().insert(bundle.trip.id, bundle);
    }

    /// Make fetches for this id fail with a store error.
    pub fn fail_for(&self, trip_id: Uuid) {
        self.failing_ids.lock().unwrap().insert(trip_id);
    }

    pub fn fetch_calls(&self) -> Vec<Uuid> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

impl Default for MockTripStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTripStore for MockTripStore {
    async fn fetch_trip_bundle(&self, trip_id: Uuid) -> Result<TripBundle> {
        self.fetch_calls.lock().unwrap().push(trip_id);

        if self.failing_ids.lock().unwrap().contains(&trip_id) {
            return Err(anyhow!("trip store error for {trip_id}"));
        }

        self.bundles
            .lock()
            .unwrap()
            .get(&trip_id)
            .cloned()
            .ok_or_else(|| anyhow!("trip {trip_id} not found"))
    }
}

// =============================================================================
// Mock Location Intelligence
// =============================================================================

pub struct MockLocationIntelligence {
    calls: Arc<Mutex<Vec<String>>>,
    fail: Mutex<bool>,
}

impl MockLocationIntelligence {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: Mutex::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockLocationIntelligence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseLocationIntelligence for MockLocationIntelligence {
    async fn get_intelligence(&self, destination: &str) -> Result<LocationIntelligence> {
        self.calls.lock().unwrap().push(destination.to_string());

        if *self.fail.lock().unwrap() {
            return Err(anyhow!("intelligence service unavailable"));
        }

        Ok(LocationIntelligence {
            location: destination.to_string(),
            pois: vec![PointOfInterest {
                name: format!("{destination} old town"),
                category: Some("sight".to_string()),
            }],
            activities: vec![format!("walking tour of {destination}")],
        })
    }
}

// =============================================================================
// Mock Image Gallery
// =============================================================================

pub struct MockImageGallery {
    urls: Mutex<Vec<String>>,
    fail: Mutex<bool>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockImageGallery {
    pub fn new() -> Self {
        Self {
            urls: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stock the gallery with `count` predictable image URLs.
    pub fn with_images(self, count: usize) -> Self {
        {
            let mut urls = self.urls.lock().unwrap();
            *urls = (0..count)
                .map(|i| format!("https://images.test/photo-{i}.jpg"))
                .collect();
        }
        self
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageGallery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseImageGallery for MockImageGallery {
    async fn fetch_gallery(&self, destination: &str, count: usize) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((destination.to_string(), count));

        if *self.fail.lock().unwrap() {
            return Err(anyhow!("gallery provider down"));
        }

        let urls = self.urls.lock().unwrap();
        Ok(urls.iter().take(count).cloned().collect())
    }
}

// =============================================================================
// Mock Geocoder
// =============================================================================

pub struct MockGeocoder {
    places: Mutex<HashMap<String, Coordinates>>,
    fail: Mutex<bool>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self {
            places: Mutex::new(HashMap::new()),
            fail: Mutex::new(false),
        }
    }

    /// Register a known place. Unknown places resolve to `None`.
    pub fn place(&self, name: &str, lat: f64, lng: f64) {
        self.places
            .lock()
            .unwrap()
            .insert(name.to_string(), Coordinates { lat, lng });
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseGeocoder for MockGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        if *self.fail.lock().unwrap() {
            return Err(anyhow!("geocoder unavailable"));
        }
        Ok(self.places.lock().unwrap().get(place).copied())
    }
}

// =============================================================================
// Mock Translator
// =============================================================================

pub struct MockTranslator {
    fail: Mutex<bool>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            fail: Mutex::new(false),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTranslator for MockTranslator {
    async fn translate(&self, text: &str, _target_script: Option<&str>) -> Result<String> {
        self.calls.lock().unwrap().push(text.to_string());

        if *self.fail.lock().unwrap() {
            return Err(anyhow!("translation service unavailable"));
        }
        Ok(format!("{text} (romanized)"))
    }
}

// =============================================================================
// Mock Completion Batch
// =============================================================================

pub struct MockCompletionBatch {
    batch_id: Mutex<String>,
    fail_submit: Mutex<bool>,
    poll_status: Mutex<BatchStatus>,
    results: Mutex<Vec<BatchResultItem>>,
    submissions: Arc<Mutex<Vec<Vec<BatchCompletionRequest>>>>,
}

impl MockCompletionBatch {
    pub fn new() -> Self {
        Self {
            batch_id: Mutex::new("batch_test_1".to_string()),
            fail_submit: Mutex::new(false),
            poll_status: Mutex::new(BatchStatus::InProgress),
            results: Mutex::new(Vec::new()),
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail_submit.lock().unwrap() = fail;
    }

    pub fn set_poll_status(&self, status: BatchStatus) {
        *self.poll_status.lock().unwrap() = status;
    }

    /// Batches submitted so far, in order.
    pub fn submissions(&self) -> Vec<Vec<BatchCompletionRequest>> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

impl Default for MockCompletionBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCompletionBatch for MockCompletionBatch {
    async fn submit_batch(&self, requests: &[BatchCompletionRequest]) -> Result<String> {
        self.submissions.lock().unwrap().push(requests.to_vec());

        if *self.fail_submit.lock().unwrap() {
            return Err(anyhow!("batch service rejected submission"));
        }
        Ok(self.batch_id.lock().unwrap().clone())
    }

    async fn poll_batch(&self, _batch_id: &str) -> Result<BatchStatus> {
        Ok(*self.poll_status.lock().unwrap())
    }

    async fn fetch_results(&self, _batch_id: &str) -> Result<Vec<BatchResultItem>> {
        Ok(self.results.lock().unwrap().clone())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// All mocks plus the wired `PipelineDeps`. Keep the struct around in tests
/// to assert on recorded calls after running the code under test.
pub struct TestDependencies {
    pub trip_store: Arc<MockTripStore>,
    pub intelligence: Arc<MockLocationIntelligence>,
    pub gallery: Arc<MockImageGallery>,
    pub geocoder: Arc<MockGeocoder>,
    pub translator: Arc<MockTranslator>,
    pub completion: Arc<MockCompletionBatch>,
    pub job_store: Arc<InMemoryBatchJobStore>,
    pub diagnostics: Arc<Diagnostics>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            trip_store: Arc::new(MockTripStore::new()),
            intelligence: Arc::new(MockLocationIntelligence::new()),
            gallery: Arc::new(MockImageGallery::new().with_images(8)),
            geocoder: Arc::new(MockGeocoder::new()),
            translator: Arc::new(MockTranslator::new()),
            completion: Arc::new(MockCompletionBatch::new()),
            job_store: Arc::new(InMemoryBatchJobStore::new()),
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }

    pub fn deps(&self) -> PipelineDeps {
        PipelineDeps::new(
            self.trip_store.clone(),
            self.intelligence.clone(),
            self.gallery.clone(),
            self.geocoder.clone(),
            self.translator.clone(),
            self.completion.clone(),
            self.job_store.clone(),
            self.diagnostics.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
