//! Image sourcing and distribution.

use tracing::warn;

use crate::domain::{BlogImage, DayContent, IMAGE_SIZE_ROTATION};
use crate::kernel::PipelineDeps;

/// Fetch destination images and assign layout metadata.
///
/// Sizes follow the fixed rotation pattern, aspect ratio is always 16:9, and
/// `position` is the image's index in the provider's ordering. A provider
/// failure degrades to an empty list.
pub async fn source_images(
    deps: &PipelineDeps,
    destination: Option<&str>,
    count: usize,
) -> Vec<BlogImage> {
    let Some(destination) = destination else {
        return vec![];
    };

    let urls = match deps.gallery.fetch_gallery(destination, count).await {
        Ok(urls) => urls,
        Err(e) => {
            warn!(destination = %destination, error = %e, "Image sourcing failed; continuing without images");
            return vec![];
        }
    };

    urls.into_iter()
        .enumerate()
        .map(|(position, url)| BlogImage {
            url,
            alt: format!("{destination} - photo {}", position + 1),
            size: IMAGE_SIZE_ROTATION[position % IMAGE_SIZE_ROTATION.len()],
            aspect_ratio: "16:9".to_string(),
            position,
        })
        .collect()
}

/// Attach sourced images to days: day `i` (0-based) receives images at
/// positions `i + 1` and `i + 2`. Position 0 stays out of every day; it is
/// the hero image.
pub fn attach_day_images(days: &mut [DayContent], images: &[BlogImage]) {
    for (i, day) in days.iter_mut().enumerate() {
        day.images = images
            .iter()
            .filter(|img| img.position == i + 1 || img.position == i + 2)
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageSize;
    use crate::kernel::TestDependencies;

    fn day(n: u32) -> DayContent {
        DayContent {
            day_number: n,
            title: format!("Day {n}"),
            description: String::new(),
            activities: vec![],
            tips: None,
            location: None,
            translated_name: None,
            images: vec![],
            affiliate_links: None,
        }
    }

    #[tokio::test]
    async fn sizes_follow_the_rotation() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.deps();

        let images = source_images(&deps, Some("Kyoto, Japan"), 8).await;
        assert_eq!(images.len(), 8);

        let sizes: Vec<ImageSize> = images.iter().map(|i| i.size).collect();
        assert_eq!(
            sizes,
            vec![
                ImageSize::Full,
                ImageSize::Large,
                ImageSize::Medium,
                ImageSize::Large,
                ImageSize::Medium,
                ImageSize::Small,
                ImageSize::Medium,
                ImageSize::Large,
            ]
        );
        assert!(images.iter().all(|i| i.aspect_ratio == "16:9"));
        assert!(images.iter().enumerate().all(|(n, i)| i.position == n));
    }

    #[tokio::test]
    async fn no_destination_yields_no_images_and_no_calls() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.deps();

        let images = source_images(&deps, None, 8).await;
        assert!(images.is_empty());
        assert!(test_deps.gallery.calls().is_empty());
    }

    #[tokio::test]
    async fn provider_error_degrades_to_empty() {
        let test_deps = TestDependencies::new();
        test_deps.gallery.set_failing(true);
        let deps = test_deps.deps();

        let images = source_images(&deps, Some("Kyoto, Japan"), 8).await;
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn day_images_respect_the_position_window() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.deps();
        let images = source_images(&deps, Some("Kyoto, Japan"), 8).await;

        let mut days: Vec<DayContent> = (1..=5).map(day).collect();
        attach_day_images(&mut days, &images);

        // Day 0 gets positions 1 and 2; the hero (0) never appears.
        let positions: Vec<usize> = days[0].images.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2]);

        for (i, day) in days.iter().enumerate() {
            for img in &day.images {
                assert_ne!(img.position, 0);
                assert!(img.position == i + 1 || img.position == i + 2);
            }
        }

        // Last day (i = 4) wants positions 5 and 6; 7 exists but belongs to
        // no day window beyond i + 2.
        let last: Vec<usize> = days[4].images.iter().map(|i| i.position).collect();
        assert_eq!(last, vec![5, 6]);
    }
}
