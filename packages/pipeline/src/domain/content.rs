//! Content types for the drafting and enrichment stages.
//!
//! `RawDraft` is the schema-constrained shape the completion service returns
//! per trip; everything else is the enriched output assembled by the
//! enhancer. Each stage has its own tagged type rather than loose JSON.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Raw draft (completion service output)
// ============================================================================

/// The blog draft the completion service produces for one trip.
///
/// Derives `JsonSchema` so the batch request can constrain the response to
/// exactly this shape (strict mode, see `completion_client::schema`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RawDraft {
    pub title: String,
    pub excerpt: String,
    pub introduction: String,
    pub destination: String,
    pub highlights: Vec<String>,
    pub days: Vec<DayDraft>,
    pub practical_info: Vec<String>,
    pub seo: SeoFields,
    pub tags: Vec<String>,
    pub category: String,
}

/// One drafted day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DayDraft {
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub activities: Vec<String>,
    pub tips: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SeoFields {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
}

// ============================================================================
// Images
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Full,
    Large,
    Medium,
    Small,
}

/// Display sizes assigned to sourced images, repeating over the gallery.
pub const IMAGE_SIZE_ROTATION: [ImageSize; 8] = [
    ImageSize::Full,
    ImageSize::Large,
    ImageSize::Medium,
    ImageSize::Large,
    ImageSize::Medium,
    ImageSize::Small,
    ImageSize::Medium,
    ImageSize::Large,
];

/// A sourced image with its layout assignment. `position` is the image's
/// index in the sourced list; position 0 is reserved as the hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogImage {
    pub url: String,
    pub alt: String,
    pub size: ImageSize,
    pub aspect_ratio: String,
    pub position: usize,
}

// ============================================================================
// Map
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
    pub label: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
}

/// Map block for the post. `route` is only present when at least two day
/// markers resolved to coordinates; it is omitted rather than left empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<Coordinates>>,
}

// ============================================================================
// Ads & affiliate links
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    Horizontal,
    Vertical,
    Rectangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdAnchor {
    Top,
    Sidebar,
    Middle,
    Bottom,
}

/// A fixed in-content ad slot chosen by the static placement rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdPlacement {
    #[serde(rename = "type")]
    pub format: AdFormat,
    pub position: AdAnchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_section: Option<String>,
    pub slot: String,
}

/// An outbound monetized link attributed to a booking provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateLink {
    pub url: String,
    pub display_text: String,
    pub provider: String,
    pub icon: String,
}

// ============================================================================
// Enhanced output
// ============================================================================

/// One enriched day, assembled from the draft plus the enrichment stages.
/// `affiliate_links` is omitted entirely when no activity matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayContent {
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub activities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<BlogImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_links: Option<Vec<AffiliateLink>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBody {
    pub introduction: String,
    pub destination: String,
    pub highlights: Vec<String>,
    pub emotional_story: String,
    pub days: Vec<DayContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_data: Option<MapData>,
    pub images: Vec<BlogImage>,
    pub ad_placements: Vec<AdPlacement>,
}

/// Final enhancer output, owned by whoever persists the blog post.
/// Produced fresh per trip; the enhancer keeps no state across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedBlogContent {
    pub title: String,
    pub excerpt: String,
    pub content: ContentBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub gallery_images: Vec<String>,
}
