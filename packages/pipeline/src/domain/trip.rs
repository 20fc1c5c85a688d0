//! Source rows read from the trip store, and the per-trip context handed to
//! the request builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A trip row as exposed by the trip store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub destination: Option<String>,
    pub cover_image: Option<String>,
    pub location_data: Option<LocationData>,
    pub created_at: DateTime<Utc>,
}

/// Route endpoints recorded on a trip, used by the map stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationData {
    pub destination: String,
    pub start_point: Option<String>,
    pub end_point: Option<String>,
}

/// A post the traveler wrote during the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPost {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub title: String,
    pub body: String,
}

/// One planned day of the trip's itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub activities: Vec<String>,
}

/// A trip with its related rows, fetched as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripBundle {
    pub trip: Trip,
    pub posts: Vec<TripPost>,
    pub itinerary: Vec<ItineraryDay>,
}

impl TripBundle {
    /// The primary destination string, preferring the trip field over the
    /// route data. None when the trip has no usable destination at all.
    pub fn primary_destination(&self) -> Option<&str> {
        self.trip
            .destination
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| self.trip.location_data.as_ref().map(|l| l.destination.as_str()))
            .filter(|d| !d.trim().is_empty())
    }
}

/// What the location-intelligence service knows about a destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationIntelligence {
    pub location: String,
    pub pois: Vec<PointOfInterest>,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub category: Option<String>,
}

/// Per-trip input to the completion request builder: the trip's own data,
/// intelligence for its primary destination (when available), and the
/// affiliate providers the draft may reference (when the run asked for them).
#[derive(Debug, Clone, Serialize)]
pub struct TripContext {
    pub bundle: TripBundle,
    pub intelligence: Option<LocationIntelligence>,
    pub affiliate_providers: Vec<String>,
}
