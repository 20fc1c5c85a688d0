//! Completion request construction.
//!
//! One schema-constrained request per trip, `custom_id` = trip id so batch
//! results can be routed back without positional assumptions.

use anyhow::{Context, Result};
use serde_json::json;

use completion_client::{BatchCompletionRequest, CompletionBody, StrictSchema};

use crate::domain::{RawDraft, TripContext};

const SYSTEM_PROMPT: &str = r#"
You are a seasoned travel writer drafting a blog post from a traveler's own trip records.

Write in first person, grounded ONLY in the trip data provided: the traveler's posts,
the day-by-day itinerary, and the destination facts. Do not invent places, prices, or
events that are not in the data.

- The introduction should set the scene in 2-3 sentences without cliches.
- Each itinerary day becomes one day section, keeping the traveler's own activities.
- Highlights are the 3-5 most distinctive moments across the whole trip.
- practical_info holds concrete logistics a reader could act on (transport, timing,
  booking notes) found in the data.
- SEO fields and tags must reflect the actual destination and activities.
- category is one of: adventure, culture, food, nature, city, family.

Respond with a JSON object matching the provided schema exactly.
"#;

/// Builds per-trip batch entries for the drafting run.
pub struct BatchRequestBuilder {
    model: String,
}

impl BatchRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Build one batch entry from a trip context.
    pub fn build(&self, context: &TripContext) -> Result<BatchCompletionRequest> {
        let trip = &context.bundle.trip;

        let user_payload = json!({
            "trip": {
                "title": trip.title,
                "destination": context.bundle.primary_destination(),
            },
            "posts": context.bundle.posts.iter().map(|p| json!({
                "title": p.title,
                "body": p.body,
            })).collect::<Vec<_>>(),
            "itinerary": context.bundle.itinerary.iter().map(|d| json!({
                "day_number": d.day_number,
                "title": d.title,
                "description": d.description,
                "location": d.location,
                "activities": d.activities,
            })).collect::<Vec<_>>(),
            "destination_intelligence": context.intelligence,
            "affiliate_providers": context.affiliate_providers,
        });

        let user_message = serde_json::to_string_pretty(&user_payload)
            .context("serialize trip context payload")?;

        Ok(BatchCompletionRequest {
            custom_id: trip.id.to_string(),
            body: CompletionBody::structured(
                &self.model,
                SYSTEM_PROMPT.trim(),
                user_message,
                RawDraft::schema_name(),
                RawDraft::strict_schema(),
            ),
        })
    }
}
