//! Static in-article ad placement rules.

use crate::domain::{AdAnchor, AdFormat, AdPlacement};

/// Fixed placement set for a post with `day_count` itinerary days.
///
/// Top, sidebar, and bottom slots always appear; the bottom banner anchors
/// after the last day when there are days. A middle rectangle is added for
/// longer itineraries (more than three days), anchored after the middle day.
pub fn static_placements(day_count: usize) -> Vec<AdPlacement> {
    let mut placements = vec![
        AdPlacement {
            format: AdFormat::Horizontal,
            position: AdAnchor::Top,
            after_section: None,
            slot: "blog-top".to_string(),
        },
        AdPlacement {
            format: AdFormat::Vertical,
            position: AdAnchor::Sidebar,
            after_section: None,
            slot: "blog-sidebar".to_string(),
        },
    ];

    if day_count > 3 {
        placements.push(AdPlacement {
            format: AdFormat::Rectangle,
            position: AdAnchor::Middle,
            after_section: Some(format!("day-{}", day_count / 2 + 1)),
            slot: "blog-middle".to_string(),
        });
    }

    placements.push(AdPlacement {
        format: AdFormat::Horizontal,
        position: AdAnchor::Bottom,
        after_section: (day_count > 0).then(|| format!("day-{day_count}")),
        slot: "blog-bottom".to_string(),
    });

    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_posts_skip_the_middle_slot() {
        let placements = static_placements(3);
        assert_eq!(placements.len(), 3);
        assert!(placements.iter().all(|p| p.position != AdAnchor::Middle));
        assert_eq!(placements[2].after_section.as_deref(), Some("day-3"));
    }

    #[test]
    fn long_posts_get_a_middle_rectangle_after_the_middle_day() {
        let placements = static_placements(5);
        assert_eq!(placements.len(), 4);

        let middle = placements
            .iter()
            .find(|p| p.position == AdAnchor::Middle)
            .unwrap();
        assert_eq!(middle.format, AdFormat::Rectangle);
        assert_eq!(middle.after_section.as_deref(), Some("day-3"));
    }

    #[test]
    fn bottom_banner_is_emitted_even_with_zero_days() {
        let placements = static_placements(0);
        assert_eq!(placements.len(), 3);
        assert_eq!(placements[0].position, AdAnchor::Top);
        assert_eq!(placements[1].position, AdAnchor::Sidebar);

        let bottom = &placements[2];
        assert_eq!(bottom.position, AdAnchor::Bottom);
        assert_eq!(bottom.format, AdFormat::Horizontal);
        assert_eq!(bottom.after_section, None);
    }
}
