//! Per-trip context assembly.
//!
//! Joins a fetched trip bundle with location intelligence for its primary
//! destination. Intelligence lookups are memoized per destination string for
//! the lifetime of the builder (one orchestration run), so ten trips to
//! "Lisbon, Portugal" cost one service call.

use std::collections::HashMap;

use tracing::warn;

use crate::affiliate;
use crate::domain::{LocationIntelligence, TripBundle, TripContext};
use crate::kernel::PipelineDeps;

pub struct TripContextBuilder<'a> {
    deps: &'a PipelineDeps,
    intelligence_cache: HashMap<String, Option<LocationIntelligence>>,
}

impl<'a> TripContextBuilder<'a> {
    pub fn new(deps: &'a PipelineDeps) -> Self {
        Self {
            deps,
            intelligence_cache: HashMap::new(),
        }
    }

    /// Build the completion-request context for one trip.
    ///
    /// Intelligence failures degrade to a context without POI data; they
    /// never drop the trip.
    pub async fn build(&mut self, bundle: TripBundle, include_affiliate: bool) -> TripContext {
        let intelligence = match bundle.primary_destination() {
            Some(destination) => self.intelligence_for(destination).await,
            None => None,
        };

        let affiliate_providers = if include_affiliate {
            affiliate::partner_providers()
                .into_iter()
                .map(String::from)
                .collect()
        } else {
            Vec::new()
        };

        TripContext {
            bundle,
            intelligence,
            affiliate_providers,
        }
    }

    async fn intelligence_for(&mut self, destination: &str) -> Option<LocationIntelligence> {
        if let Some(cached) = self.intelligence_cache.get(destination) {
            return cached.clone();
        }

        let fetched = match self.deps.intelligence.get_intelligence(destination).await {
            Ok(intelligence) => Some(intelligence),
            Err(e) => {
                warn!(destination = %destination, error = %e, "Location intelligence lookup failed");
                None
            }
        };

        self.intelligence_cache
            .insert(destination.to_string(), fetched.clone());
        fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;
    use chrono::Utc;
    use uuid::Uuid;

    fn bundle(destination: &str) -> TripBundle {
        TripBundle {
            trip: crate::domain::Trip {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                title: "Trip".into(),
                destination: Some(destination.into()),
                cover_image: None,
                location_data: None,
                created_at: Utc::now(),
            },
            posts: vec![],
            itinerary: vec![],
        }
    }

    #[tokio::test]
    async fn intelligence_is_memoized_per_destination() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.deps();
        let mut builder = TripContextBuilder::new(&deps);

        builder.build(bundle("Lisbon, Portugal"), false).await;
        builder.build(bundle("Lisbon, Portugal"), false).await;
        builder.build(bundle("Porto, Portugal"), false).await;

        assert_eq!(
            test_deps.intelligence.calls(),
            vec!["Lisbon, Portugal", "Porto, Portugal"]
        );
    }

    #[tokio::test]
    async fn intelligence_failure_degrades_to_none() {
        let test_deps = TestDependencies::new();
        test_deps.intelligence.set_failing(true);
        let deps = test_deps.deps();
        let mut builder = TripContextBuilder::new(&deps);

        let context = builder.build(bundle("Lisbon, Portugal"), false).await;
        assert!(context.intelligence.is_none());

        // Failures are cached too; no retry storm within a run.
        builder.build(bundle("Lisbon, Portugal"), false).await;
        assert_eq!(test_deps.intelligence.calls().len(), 1);
    }

    #[tokio::test]
    async fn affiliate_providers_follow_the_run_option() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.deps();
        let mut builder = TripContextBuilder::new(&deps);

        let with = builder.build(bundle("Rome, Italy"), true).await;
        assert!(with.affiliate_providers.contains(&"booking".to_string()));

        let without = builder.build(bundle("Rome, Italy"), false).await;
        assert!(without.affiliate_providers.is_empty());
    }

    #[tokio::test]
    async fn trip_without_destination_skips_intelligence() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.deps();
        let mut builder = TripContextBuilder::new(&deps);

        let mut b = bundle("x");
        b.trip.destination = None;
        let context = builder.build(b, false).await;

        assert!(context.intelligence.is_none());
        assert!(test_deps.intelligence.calls().is_empty());
    }
}
