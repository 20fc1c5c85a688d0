//! Kernel module - pipeline infrastructure and dependencies.

pub mod batch_fetch;
pub mod deps;
pub mod diagnostics;
pub mod gallery_client;
pub mod geocode;
pub mod intelligence_client;
pub mod test_dependencies;
pub mod traits;
pub mod translate_client;

/// Default model for blog drafting batches.
pub const DRAFT_MODEL: &str = "gpt-4o-mini";

pub use batch_fetch::{fetch_in_groups, BatchFetchConfig};
pub use deps::{CompletionBatchAdapter, PipelineDeps};
pub use diagnostics::{Diagnostics, PerformanceRecorder};
pub use gallery_client::{GalleryClient, NoopImageGallery};
pub use geocode::{distance_km, NominatimGeocoder};
pub use intelligence_client::{IntelligenceClient, NoopLocationIntelligence};
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use translate_client::{has_non_latin, NoopTranslator, TranslateClient};
