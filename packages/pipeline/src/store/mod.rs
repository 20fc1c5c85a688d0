//! Persistence implementations for the collaborator store contracts.

pub mod batch_jobs;
pub mod trips;

pub use batch_jobs::{InMemoryBatchJobStore, PgBatchJobStore};
pub use trips::PgTripStore;
