//! Blog drafting orchestration.
//!
//! One run: validate the job input, fetch trips in rate-limited groups,
//! build one schema-constrained completion request per surviving trip,
//! submit them as a single batch, then start and persist the job.
//!
//! Failure policy: per-trip fetch errors drop that trip and the run
//! continues; whole-run errors come back as a failed result carrying the
//! still-pending job, never as a panic or a half-started record.

use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::TripContextBuilder;
use crate::domain::{BatchJob, BatchJobOptions, BatchJobType, TripBundle};
use crate::kernel::{batch_fetch, BatchFetchConfig, PipelineDeps, DRAFT_MODEL};
use crate::request::BatchRequestBuilder;

#[derive(Debug, Error)]
enum RunError {
    #[error("no trips could be loaded for the requested ids")]
    NoTripsFound,

    #[error("trip fetch phase timed out after {0:?}")]
    FetchTimeout(Duration),
}

/// Caller input for one drafting run.
#[derive(Debug, Clone)]
pub struct GenerateBlogPostsInput {
    pub user_id: Uuid,
    pub trip_ids: Vec<Uuid>,
    pub auto_publish: bool,
    pub include_affiliate: bool,
    pub seo_optimize: bool,
}

/// Outcome handed back to the caller (API route, CLI). Always definite:
/// either a started job to poll, or the reasons nothing was submitted.
#[derive(Debug)]
pub struct GenerateBlogPostsResult {
    pub success: bool,
    pub batch_job: BatchJob,
    pub errors: Vec<String>,
}

/// Tunables for a run; defaults match production rate limits.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub batch_fetch: BatchFetchConfig,
    pub fetch_timeout: Duration,
    pub draft_model: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            batch_fetch: BatchFetchConfig::default(),
            fetch_timeout: Duration::from_secs(120),
            draft_model: DRAFT_MODEL.to_string(),
        }
    }
}

pub struct GenerateBlogPostsUseCase {
    settings: RunSettings,
}

impl GenerateBlogPostsUseCase {
    pub fn new(settings: RunSettings) -> Self {
        Self { settings }
    }

    pub async fn execute(
        &self,
        input: GenerateBlogPostsInput,
        deps: &PipelineDeps,
    ) -> GenerateBlogPostsResult {
        let job = BatchJob::create(
            input.user_id,
            BatchJobType::BlogPostsFromTrips,
            input.trip_ids.clone(),
            BatchJobOptions {
                auto_publish: input.auto_publish,
                include_affiliate: input.include_affiliate,
                seo_optimize: input.seo_optimize,
            },
        );

        // Invalid input never reaches an external service.
        let validation_errors = job.validate();
        if !validation_errors.is_empty() {
            return GenerateBlogPostsResult {
                success: false,
                batch_job: job,
                errors: validation_errors,
            };
        }

        match self.run(&input, &job, deps).await {
            Ok(started) => GenerateBlogPostsResult {
                success: true,
                batch_job: started,
                errors: vec![],
            },
            Err(e) => {
                warn!(job_id = %job.id, error = %e, "Blog drafting run failed");
                GenerateBlogPostsResult {
                    success: false,
                    batch_job: job,
                    errors: vec![format!("{e:#}")],
                }
            }
        }
    }

    /// Steps 2-6; any error here surfaces as a failed result with the
    /// original pending job untouched.
    async fn run(
        &self,
        input: &GenerateBlogPostsInput,
        job: &BatchJob,
        deps: &PipelineDeps,
    ) -> Result<BatchJob> {
        let bundles = self.fetch_bundles(&input.trip_ids, deps).await?;

        let mut context_builder = TripContextBuilder::new(deps);
        let request_builder = BatchRequestBuilder::new(&self.settings.draft_model);

        let mut requests = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            let context = context_builder.build(bundle, input.include_affiliate).await;
            requests.push(request_builder.build(&context)?);
        }

        let batch_id = deps
            .completion
            .submit_batch(&requests)
            .await
            .context("batch submission failed")?;

        let mut started = job.clone();
        started.start(&batch_id)?;
        deps.job_store
            .save(&started)
            .await
            .context("failed to persist batch job")?;

        info!(
            job_id = %started.id,
            batch_id = %batch_id,
            trip_count = requests.len(),
            "Batch submitted and job started"
        );

        Ok(started)
    }

    /// Grouped, timeout-guarded fetch. Individual failures drop the trip;
    /// an empty surviving set fails the run before any submission.
    async fn fetch_bundles(
        &self,
        trip_ids: &[Uuid],
        deps: &PipelineDeps,
    ) -> Result<Vec<TripBundle>> {
        let fetches = batch_fetch::fetch_in_groups(trip_ids, &self.settings.batch_fetch, |id| {
            deps.trip_store.fetch_trip_bundle(id)
        });

        let outcomes = tokio::time::timeout(self.settings.fetch_timeout, fetches)
            .await
            .map_err(|_| RunError::FetchTimeout(self.settings.fetch_timeout))?;

        let mut bundles = Vec::with_capacity(outcomes.len());
        for (trip_id, outcome) in outcomes {
            match outcome {
                Ok(bundle) => bundles.push(bundle),
                Err(e) => {
                    warn!(trip_id = %trip_id, error = %e, "Dropping trip from batch");
                }
            }
        }

        if bundles.is_empty() {
            return Err(RunError::NoTripsFound.into());
        }

        Ok(bundles)
    }
}
