//! Nominatim (OpenStreetMap) geocoder for map markers.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::Coordinates;

use super::BaseGeocoder;

/// Nominatim API response row.
#[derive(Debug, Deserialize)]
struct NominatimRow {
    lat: String,
    lon: String,
}

/// Free-form place-name geocoder against Nominatim.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: "https://nominatim.openstreetmap.org".to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl BaseGeocoder for NominatimGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place.trim())
        );

        debug!(place = %place, "Geocoding place");

        let rows: Vec<NominatimRow> = self
            .client
            .get(&url)
            .header("User-Agent", "Waypost/1.0 (travel blog maps)")
            .send()
            .await
            .context("Geocoding request failed")?
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        let Some(row) = rows.first() else {
            warn!(place = %place, "Place not found by geocoder");
            return Ok(None);
        };

        let lat: f64 = row
            .lat
            .parse()
            .map_err(|e| anyhow!("Invalid latitude in response: {}", e))?;
        let lng: f64 = row
            .lon
            .parse()
            .map_err(|e| anyhow!("Invalid longitude in response: {}", e))?;

        Ok(Some(Coordinates { lat, lng }))
    }
}

/// Distance between two coordinates in kilometers (haversine).
///
/// The map stage uses this to pick a zoom level that fits the route span.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
