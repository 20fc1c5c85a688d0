//! Affiliate link classification.
//!
//! Maps an activity mention plus a location to at most one monetized outbound
//! link. Classification is a fixed priority list of keyword categories tested
//! against the lower-cased activity text; the first category that matches
//! wins. Dining and transport are deliberately unmapped (no partner deals),
//! so matching them returns no link.

use std::sync::Arc;

use crate::domain::AffiliateLink;
use crate::kernel::Diagnostics;

struct Category {
    name: &'static str,
    keywords: &'static [&'static str],
    /// None for categories we recognize but have no partner for.
    partner: Option<Partner>,
}

struct Partner {
    provider: &'static str,
    icon: &'static str,
    display_text: &'static str,
    url_template: &'static str,
}

/// Priority-ordered category table. Order matters: an activity mentioning
/// both an apartment and a hotel gets the rental link.
const CATEGORIES: &[Category] = &[
    Category {
        name: "accommodation_rental",
        keywords: &["airbnb", "apartment", "vacation rental", "homestay", "villa", "guesthouse"],
        partner: Some(Partner {
            provider: "airbnb",
            icon: "home",
            display_text: "Find a place to stay in {location}",
            url_template: "https://www.airbnb.com/s/{location}/homes",
        }),
    },
    Category {
        name: "coworking",
        keywords: &["cowork", "coworking", "remote work", "digital nomad", "workspace"],
        partner: Some(Partner {
            provider: "coworker",
            icon: "laptop",
            display_text: "Book a desk in {location}",
            url_template: "https://www.coworker.com/search?query={location}",
        }),
    },
    Category {
        name: "hotel",
        keywords: &["hotel", "resort", "hostel", "check-in", "checkin", "accommodation"],
        partner: Some(Partner {
            provider: "booking",
            icon: "bed",
            display_text: "Compare hotels in {location}",
            url_template: "https://www.booking.com/searchresults.html?ss={location}",
        }),
    },
    Category {
        name: "tours",
        keywords: &[
            "tour", "museum", "ticket", "guided", "excursion", "sightseeing", "gallery",
            "attraction", "temple", "palace", "castle",
        ],
        partner: Some(Partner {
            provider: "getyourguide",
            icon: "map",
            display_text: "Book tours & tickets in {location}",
            url_template: "https://www.getyourguide.com/s/?q={location}",
        }),
    },
    Category {
        name: "dining",
        keywords: &[
            "restaurant", "lunch", "dinner", "breakfast", "brunch", "cafe", "food", "eat",
            "tasting", "street food",
        ],
        partner: None,
    },
    Category {
        name: "transport",
        keywords: &["train", "bus", "taxi", "transfer", "flight", "ferry", "metro", "tram"],
        partner: None,
    },
    Category {
        name: "outdoor",
        keywords: &[
            "hike", "hiking", "trek", "trail", "kayak", "climb", "surf", "ski", "camping",
            "cycling", "snorkel", "dive",
        ],
        partner: Some(Partner {
            provider: "alltrails",
            icon: "mountain",
            display_text: "Explore outdoor activities near {location}",
            url_template: "https://www.alltrails.com/explore?q={location}",
        }),
    },
];

/// Providers we currently hold partner deals with, in priority order.
/// Surfaced to the draft prompt so the model can mention bookable things.
pub fn partner_providers() -> Vec<&'static str> {
    CATEGORIES
        .iter()
        .filter_map(|c| c.partner.as_ref().map(|p| p.provider))
        .collect()
}

/// Deterministic keyword classifier for activity mentions.
pub struct AffiliateLinkClassifier {
    diagnostics: Arc<Diagnostics>,
}

impl AffiliateLinkClassifier {
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self { diagnostics }
    }

    /// Classify one activity mention. Returns `None` when no category
    /// matches, or the matched category has no partner.
    pub fn classify(&self, activity: &str, location: &str) -> Option<AffiliateLink> {
        let text = activity.to_lowercase();

        let category = CATEGORIES
            .iter()
            .find(|c| c.keywords.iter().any(|k| text.contains(k)))?;

        let Some(partner) = &category.partner else {
            self.diagnostics.warn_once(
                category.name,
                "activity category has no affiliate partner; emitting no link",
            );
            return None;
        };

        let encoded = urlencoding::encode(location);
        Some(AffiliateLink {
            url: partner.url_template.replace("{location}", &encoded),
            display_text: partner.display_text.replace("{location}", location),
            provider: partner.provider.to_string(),
            icon: partner.icon.to_string(),
        })
    }

    /// Classify a day's activities, keeping only the first link per provider
    /// in encounter order.
    pub fn classify_many(&self, activities: &[String], location: &str) -> Vec<AffiliateLink> {
        let mut seen = std::collections::HashSet::new();
        let mut links = Vec::new();

        for activity in activities {
            if let Some(link) = self.classify(activity, location) {
                if seen.insert(link.provider.clone()) {
                    links.push(link);
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> AffiliateLinkClassifier {
        AffiliateLinkClassifier::new(Arc::new(Diagnostics::new()))
    }

    #[test]
    fn tour_activity_maps_to_tours_partner() {
        let link = classifier()
            .classify("Book a guided museum tour", "Rome")
            .unwrap();
        assert_eq!(link.provider, "getyourguide");
        assert!(link.url.contains("Rome"));
        assert!(link.display_text.contains("Rome"));
    }

    #[test]
    fn dining_is_recognized_but_unmapped() {
        assert!(classifier().classify("Grab lunch at a cafe", "Rome").is_none());
    }

    #[test]
    fn transport_is_recognized_but_unmapped() {
        assert!(classifier().classify("Take the train to Naples", "Rome").is_none());
    }

    #[test]
    fn unmatched_activity_returns_none() {
        assert!(classifier().classify("Write postcards home", "Rome").is_none());
    }

    #[test]
    fn classification_is_idempotent() {
        let c = classifier();
        let a = c.classify("Check in to the hotel", "Banff");
        let b = c.classify("Check in to the hotel", "Banff");
        assert_eq!(a, b);
    }

    #[test]
    fn rental_outranks_hotel() {
        let link = classifier()
            .classify("Stay at an apartment instead of a hotel", "Lisbon")
            .unwrap();
        assert_eq!(link.provider, "airbnb");
    }

    #[test]
    fn location_is_url_encoded() {
        let link = classifier().classify("hotel night", "São Paulo").unwrap();
        assert!(!link.url.contains(' '));
        assert!(link.url.contains("S%C3%A3o"));
    }

    #[test]
    fn classify_many_dedupes_by_provider() {
        let activities = vec![
            "hotel stay".to_string(),
            "another hotel".to_string(),
            "hike the trail".to_string(),
        ];
        let links = classifier().classify_many(&activities, "Banff");

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].provider, "booking");
        assert_eq!(links[1].provider, "alltrails");
    }

    #[test]
    fn classify_many_preserves_encounter_order() {
        let activities = vec![
            "kayak on the lake".to_string(),
            "hotel check-in".to_string(),
        ];
        let links = classifier().classify_many(&activities, "Banff");
        assert_eq!(links[0].provider, "alltrails");
        assert_eq!(links[1].provider, "booking");
    }

    #[test]
    fn unmapped_categories_warn_once() {
        let diagnostics = Arc::new(Diagnostics::new());
        let c = AffiliateLinkClassifier::new(diagnostics.clone());

        c.classify("dinner downtown", "Rome");
        c.classify("breakfast at the cafe", "Rome");
        c.classify("ferry to the island", "Rome");

        let mut keys = diagnostics.warned_keys();
        keys.sort();
        assert_eq!(keys, vec!["dining", "transport"]);
    }
}
