//! Batch-job persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{BatchJob, BatchJobStatus, BatchJobType};
use crate::kernel::BaseBatchJobStore;

// =============================================================================
// Postgres store
// =============================================================================

/// `batch_jobs` table access (see migrations/0001_batch_jobs.sql).
pub struct PgBatchJobStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct BatchJobRow {
    id: Uuid,
    user_id: Uuid,
    job_type: String,
    source_ids: Vec<Uuid>,
    options: serde_json::Value,
    status: String,
    external_batch_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BatchJobRow {
    fn into_job(self) -> Result<BatchJob> {
        let status = BatchJobStatus::parse(&self.status)
            .ok_or_else(|| anyhow!("unknown batch job status in row: {}", self.status))?;

        Ok(BatchJob {
            id: self.id,
            user_id: self.user_id,
            job_type: BatchJobType::parse(&self.job_type),
            source_ids: self.source_ids,
            options: serde_json::from_value(self.options)
                .context("invalid options json in batch_jobs row")?,
            status,
            external_batch_id: self.external_batch_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl PgBatchJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseBatchJobStore for PgBatchJobStore {
    async fn save(&self, job: &BatchJob) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO batch_jobs (
                id, user_id, job_type, source_ids, options, status,
                external_batch_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                external_batch_id = EXCLUDED.external_batch_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(job.job_type.as_str())
        .bind(&job.source_ids)
        .bind(serde_json::to_value(job.options).context("serialize batch job options")?)
        .bind(job.status.as_str())
        .bind(&job.external_batch_id)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BatchJobStatus) -> Result<()> {
        let updated = sqlx::query(
            r#"
            UPDATE batch_jobs
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            anyhow::bail!("batch job {id} not found");
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BatchJob>> {
        let row = sqlx::query_as::<_, BatchJobRow>(
            r#"
            SELECT id, user_id, job_type, source_ids, options, status,
                   external_batch_id, created_at, updated_at
            FROM batch_jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BatchJobRow::into_job).transpose()
    }
}

// =============================================================================
// In-memory store (tests, dry runs)
// =============================================================================

#[derive(Default)]
pub struct InMemoryBatchJobStore {
    jobs: Mutex<HashMap<Uuid, BatchJob>>,
}

impl InMemoryBatchJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, BatchJob>> {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BaseBatchJobStore for InMemoryBatchJobStore {
    async fn save(&self, job: &BatchJob) -> Result<()> {
        self.lock().insert(job.id, job.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BatchJobStatus) -> Result<()> {
        let mut jobs = self.lock();
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| anyhow!("batch job {id} not found"))?;
        job.status = status;
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BatchJob>> {
        Ok(self.lock().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BatchJobOptions;

    fn job() -> BatchJob {
        BatchJob::create(
            Uuid::new_v4(),
            BatchJobType::BlogPostsFromTrips,
            vec![Uuid::new_v4()],
            BatchJobOptions::default(),
        )
    }

    #[tokio::test]
    async fn in_memory_store_round_trips() {
        let store = InMemoryBatchJobStore::new();
        let saved = job();
        store.save(&saved).await.unwrap();

        let found = store.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.status, BatchJobStatus::Pending);
    }

    #[tokio::test]
    async fn update_status_on_missing_job_errors() {
        let store = InMemoryBatchJobStore::new();
        let err = store
            .update_status(Uuid::new_v4(), BatchJobStatus::Completed)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn update_status_bumps_updated_at() {
        let store = InMemoryBatchJobStore::new();
        let saved = job();
        store.save(&saved).await.unwrap();

        store
            .update_status(saved.id, BatchJobStatus::Failed)
            .await
            .unwrap();
        let found = store.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.status, BatchJobStatus::Failed);
        assert!(found.updated_at >= saved.updated_at);
    }
}
