//! Map construction from trip route data.

use tracing::warn;

use crate::domain::{Coordinates, DayContent, MapData, MapMarker, Trip};
use crate::kernel::{distance_km, PipelineDeps};

/// Geocode a place name, degrading to `None` on lookup failure.
async fn resolve(deps: &PipelineDeps, place: &str) -> Option<Coordinates> {
    match deps.geocoder.geocode(place).await {
        Ok(coords) => coords,
        Err(e) => {
            warn!(place = %place, error = %e, "Geocoding failed");
            None
        }
    }
}

/// Build map data for a trip.
///
/// Returns `None` when the trip carries no location data at all. Start and
/// end markers fall back to `(0, 0)` when geocoding cannot resolve them; day
/// markers are only emitted for days that resolve. A route polyline appears
/// only when at least two day markers resolved.
pub async fn build(deps: &PipelineDeps, trip: &Trip, days: &[DayContent]) -> Option<MapData> {
    let location_data = trip.location_data.as_ref()?;

    let start_place = location_data
        .start_point
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| {
            let d = location_data.destination.trim();
            (!d.is_empty()).then_some(d)
        })?;

    let start = MapMarker {
        label: start_place.to_string(),
        coordinates: resolve(deps, start_place)
            .await
            .unwrap_or(Coordinates { lat: 0.0, lng: 0.0 }),
        day_number: None,
    };

    let mut markers = vec![start];

    if let Some(end_place) = location_data.end_point.as_deref() {
        markers.push(MapMarker {
            label: end_place.to_string(),
            coordinates: resolve(deps, end_place)
                .await
                .unwrap_or(Coordinates { lat: 0.0, lng: 0.0 }),
            day_number: None,
        });
    }

    let mut day_markers = Vec::new();
    for day in days {
        let Some(location) = day.location.as_deref() else {
            continue;
        };
        if let Some(coordinates) = resolve(deps, location).await {
            day_markers.push(MapMarker {
                label: location.to_string(),
                coordinates,
                day_number: Some(day.day_number),
            });
        }
    }

    let route = if day_markers.len() >= 2 {
        Some(day_markers.iter().map(|m| m.coordinates).collect())
    } else {
        None
    };

    markers.extend(day_markers);

    let center = center_of(&markers);
    let zoom = zoom_for(&markers);

    Some(MapData {
        center,
        zoom,
        markers,
        route,
    })
}

fn center_of(markers: &[MapMarker]) -> Coordinates {
    let resolved: Vec<Coordinates> = markers
        .iter()
        .map(|m| m.coordinates)
        .filter(|c| c.lat != 0.0 || c.lng != 0.0)
        .collect();
    if resolved.is_empty() {
        return Coordinates { lat: 0.0, lng: 0.0 };
    }
    let n = resolved.len() as f64;
    Coordinates {
        lat: resolved.iter().map(|c| c.lat).sum::<f64>() / n,
        lng: resolved.iter().map(|c| c.lng).sum::<f64>() / n,
    }
}

/// Pick a zoom level from the widest distance between any two resolved
/// markers. Placeholder coordinates are ignored so one failed geocode does
/// not zoom the map out to the whole hemisphere.
fn zoom_for(markers: &[MapMarker]) -> u8 {
    let resolved: Vec<Coordinates> = markers
        .iter()
        .map(|m| m.coordinates)
        .filter(|c| c.lat != 0.0 || c.lng != 0.0)
        .collect();
    let mut span = 0.0f64;
    for (i, a) in resolved.iter().enumerate() {
        for b in &resolved[i + 1..] {
            span = span.max(distance_km(*a, *b));
        }
    }
    if span < 50.0 {
        10
    } else if span < 300.0 {
        8
    } else if span < 1000.0 {
        6
    } else {
        4
    }
}
