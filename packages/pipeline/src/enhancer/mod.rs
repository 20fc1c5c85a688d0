//! Multi-stage enrichment of drafted posts.
//!
//! Each stage is independently fault-tolerant: a failing image provider,
//! geocoder, or translator degrades that stage and never aborts the others.

pub mod ads;
pub mod images;
pub mod map;
pub mod narrative;
pub mod translation;

pub use narrative::Persona;

use crate::affiliate::AffiliateLinkClassifier;
use crate::domain::{ContentBody, DayContent, EnhancedBlogContent, RawDraft, Trip};
use crate::kernel::PipelineDeps;

/// How many gallery images beyond the hero are surfaced on the post itself.
const GALLERY_IMAGE_COUNT: usize = 5;

pub struct BlogPostEnhancer<'a> {
    deps: &'a PipelineDeps,
    classifier: AffiliateLinkClassifier,
    gallery_size: usize,
}

impl<'a> BlogPostEnhancer<'a> {
    pub fn new(deps: &'a PipelineDeps, gallery_size: usize) -> Self {
        let classifier = AffiliateLinkClassifier::new(deps.diagnostics.clone());
        Self {
            deps,
            classifier,
            gallery_size,
        }
    }

    /// Enrich a draft into publish-ready content.
    pub async fn enhance(
        &self,
        draft: RawDraft,
        trip: &Trip,
        persona: Option<Persona>,
    ) -> EnhancedBlogContent {
        let destination = trip
            .destination
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| draft.destination.clone());
        let destination = destination.trim().to_string();
        let known_destination = (!destination.is_empty()).then_some(destination.as_str());

        let images =
            images::source_images(self.deps, known_destination, self.gallery_size).await;

        let mut days: Vec<DayContent> = draft
            .days
            .into_iter()
            .map(|day| DayContent {
                day_number: day.day_number,
                title: day.title,
                description: day.description,
                activities: day.activities,
                tips: day.tips,
                location: day.location,
                translated_name: None,
                images: vec![],
                affiliate_links: None,
            })
            .collect();

        images::attach_day_images(&mut days, &images);

        if known_destination.is_some_and(translation::needs_translation) {
            translation::apply(self.deps, &mut days).await;
        }

        for day in days.iter_mut() {
            let Some(location) = day.location.as_deref() else {
                continue;
            };
            if day.activities.is_empty() {
                continue;
            }
            let links = self.classifier.classify_many(&day.activities, location);
            if !links.is_empty() {
                day.affiliate_links = Some(links);
            }
        }

        let map_data = map::build(self.deps, trip, &days).await;
        let ad_placements = ads::static_placements(days.len());

        // The hook opens the introduction and is also surfaced standalone.
        let persona = persona.unwrap_or_default();
        let introduction = format!("{}\n\n{}", persona.hook(), draft.introduction);
        let emotional_story = persona.hook().to_string();

        let featured_image = images
            .first()
            .map(|img| img.url.clone())
            .or_else(|| trip.cover_image.clone());
        let gallery_images = images
            .iter()
            .skip(1)
            .take(GALLERY_IMAGE_COUNT)
            .map(|img| img.url.clone())
            .collect();

        EnhancedBlogContent {
            title: draft.title,
            excerpt: draft.excerpt,
            content: ContentBody {
                introduction,
                destination,
                highlights: draft.highlights,
                emotional_story,
                days,
                map_data,
                images,
                ad_placements,
            },
            featured_image,
            gallery_images,
        }
    }
}
