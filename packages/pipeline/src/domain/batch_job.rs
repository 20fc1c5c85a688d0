//! BatchJob entity - one orchestration run against the completion batch service.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchJobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl BatchJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchJobStatus::Pending => "pending",
            BatchJobStatus::Running => "running",
            BatchJobStatus::Completed => "completed",
            BatchJobStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BatchJobStatus::Pending),
            "running" => Some(BatchJobStatus::Running),
            "completed" => Some(BatchJobStatus::Completed),
            "failed" => Some(BatchJobStatus::Failed),
            _ => None,
        }
    }
}

/// Closed set of orchestration kinds. `Unknown` only ever appears when an
/// unrecognized tag is parsed back out of storage; it never validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchJobType {
    BlogPostsFromTrips,
    #[serde(other)]
    Unknown,
}

impl BatchJobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchJobType::BlogPostsFromTrips => "blog_posts_from_trips",
            BatchJobType::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "blog_posts_from_trips" => BatchJobType::BlogPostsFromTrips,
            _ => BatchJobType::Unknown,
        }
    }
}

/// Structured flags carried by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJobOptions {
    pub auto_publish: bool,
    pub include_affiliate: bool,
    pub seo_optimize: bool,
}

// ============================================================================
// BatchJob
// ============================================================================

/// One batch run: which trips, for whom, with what options, and where the
/// external service is with it.
///
/// Lifecycle: `Pending → Running → {Completed, Failed}`. The external batch
/// id is present exactly when the job has left `Pending`. `source_ids` is
/// fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct BatchJob {
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,

    pub user_id: Uuid,
    pub job_type: BatchJobType,
    pub source_ids: Vec<Uuid>,

    #[builder(default)]
    pub options: BatchJobOptions,

    #[builder(default)]
    pub status: BatchJobStatus,

    #[builder(default, setter(strip_option))]
    pub external_batch_id: Option<String>,

    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl BatchJob {
    /// Create a new job in `Pending` with no external id.
    pub fn create(
        user_id: Uuid,
        job_type: BatchJobType,
        source_ids: Vec<Uuid>,
        options: BatchJobOptions,
    ) -> Self {
        Self::builder()
            .user_id(user_id)
            .job_type(job_type)
            .source_ids(source_ids)
            .options(options)
            .build()
    }

    /// Check the job's input without mutating it. An empty vec means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.source_ids.is_empty() {
            errors.push("source_ids must not be empty".to_string());
        }
        if self.job_type == BatchJobType::Unknown {
            errors.push("unsupported job type".to_string());
        }

        errors
    }

    /// Transition `Pending → Running`, recording the service-assigned batch id.
    ///
    /// Rejected from any other state without touching `status` or
    /// `external_batch_id`. Validation is the caller's responsibility; only
    /// the transition precondition is enforced here.
    pub fn start(&mut self, external_batch_id: impl Into<String>) -> Result<()> {
        if self.status != BatchJobStatus::Pending {
            bail!(
                "cannot start batch job {} from status {}",
                self.id,
                self.status.as_str()
            );
        }

        self.status = BatchJobStatus::Running;
        self.external_batch_id = Some(external_batch_id.into());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Terminal transition applied by the poller once the service finishes.
    pub fn complete(&mut self) -> Result<()> {
        if self.status != BatchJobStatus::Running {
            bail!(
                "cannot complete batch job {} from status {}",
                self.id,
                self.status.as_str()
            );
        }
        self.status = BatchJobStatus::Completed;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Terminal transition applied by the poller on a failed batch.
    pub fn fail(&mut self) -> Result<()> {
        if self.status != BatchJobStatus::Running {
            bail!(
                "cannot fail batch job {} from status {}",
                self.id,
                self.status.as_str()
            );
        }
        self.status = BatchJobStatus::Failed;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> BatchJob {
        BatchJob::create(
            Uuid::new_v4(),
            BatchJobType::BlogPostsFromTrips,
            vec![Uuid::new_v4()],
            BatchJobOptions::default(),
        )
    }

    #[test]
    fn new_job_starts_pending_without_external_id() {
        let job = sample_job();
        assert_eq!(job.status, BatchJobStatus::Pending);
        assert!(job.external_batch_id.is_none());
    }

    #[test]
    fn valid_job_produces_no_errors() {
        assert!(sample_job().validate().is_empty());
    }

    #[test]
    fn empty_source_ids_fail_validation() {
        let job = BatchJob::create(
            Uuid::new_v4(),
            BatchJobType::BlogPostsFromTrips,
            vec![],
            BatchJobOptions::default(),
        );
        let errors = job.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("source_ids"));
    }

    #[test]
    fn unknown_job_type_fails_validation() {
        let mut job = sample_job();
        job.job_type = BatchJobType::parse("make_coffee");
        assert!(job.validate().iter().any(|e| e.contains("job type")));
    }

    #[test]
    fn validate_does_not_mutate() {
        let job = sample_job();
        let before = job.clone();
        let _ = job.validate();
        assert_eq!(job.status, before.status);
        assert_eq!(job.updated_at, before.updated_at);
    }

    #[test]
    fn start_moves_pending_to_running() {
        let mut job = sample_job();
        job.start("batch_abc").unwrap();
        assert_eq!(job.status, BatchJobStatus::Running);
        assert_eq!(job.external_batch_id.as_deref(), Some("batch_abc"));
    }

    #[test]
    fn start_twice_is_rejected_without_mutation() {
        let mut job = sample_job();
        job.start("batch_abc").unwrap();
        let updated_at = job.updated_at;

        assert!(job.start("batch_other").is_err());
        assert_eq!(job.status, BatchJobStatus::Running);
        assert_eq!(job.external_batch_id.as_deref(), Some("batch_abc"));
        assert_eq!(job.updated_at, updated_at);
    }

    #[test]
    fn terminal_transitions_require_running() {
        let mut job = sample_job();
        assert!(job.complete().is_err());
        assert!(job.fail().is_err());

        job.start("batch_abc").unwrap();
        job.complete().unwrap();
        assert_eq!(job.status, BatchJobStatus::Completed);

        // Already terminal.
        assert!(job.fail().is_err());
    }

    #[test]
    fn job_type_round_trips_through_tags() {
        assert_eq!(
            BatchJobType::parse("blog_posts_from_trips"),
            BatchJobType::BlogPostsFromTrips
        );
        assert_eq!(BatchJobType::parse("nope"), BatchJobType::Unknown);
    }
}
