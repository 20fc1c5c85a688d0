//! Domain model: batch jobs, trip source rows, and per-stage content types.

pub mod batch_job;
pub mod content;
pub mod trip;

pub use batch_job::{BatchJob, BatchJobOptions, BatchJobStatus, BatchJobType};
pub use content::*;
pub use trip::*;
