//! Read access to the main application's trip tables.
//!
//! The trip/post/itinerary tables are owned by the CRUD side of the product;
//! this store only reads them to assemble per-trip bundles for the pipeline.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{ItineraryDay, LocationData, Trip, TripBundle, TripPost};
use crate::kernel::BaseTripStore;

pub struct PgTripStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct TripRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    destination: Option<String>,
    cover_image: Option<String>,
    location_data: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    trip_id: Uuid,
    title: String,
    body: String,
}

#[derive(FromRow)]
struct ItineraryRow {
    day_number: i32,
    title: String,
    description: String,
    location: Option<String>,
    activities: Vec<String>,
}

impl PgTripStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseTripStore for PgTripStore {
    async fn fetch_trip_bundle(&self, trip_id: Uuid) -> Result<TripBundle> {
        let trip_row = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, user_id, title, destination, cover_image, location_data, created_at
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| anyhow!("trip {trip_id} not found"))?;

        let posts = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, trip_id, title, body
            FROM trip_posts
            WHERE trip_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        let itinerary = sqlx::query_as::<_, ItineraryRow>(
            r#"
            SELECT day_number, title, description, location, activities
            FROM trip_itinerary_days
            WHERE trip_id = $1
            ORDER BY day_number ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        let location_data: Option<LocationData> = trip_row
            .location_data
            .map(serde_json::from_value)
            .transpose()
            .unwrap_or_else(|e| {
                tracing::warn!(trip_id = %trip_id, error = %e, "Dropping malformed location_data");
                None
            });

        Ok(TripBundle {
            trip: Trip {
                id: trip_row.id,
                user_id: trip_row.user_id,
                title: trip_row.title,
                destination: trip_row.destination,
                cover_image: trip_row.cover_image,
                location_data,
                created_at: trip_row.created_at,
            },
            posts: posts
                .into_iter()
                .map(|p| TripPost {
                    id: p.id,
                    trip_id: p.trip_id,
                    title: p.title,
                    body: p.body,
                })
                .collect(),
            itinerary: itinerary
                .into_iter()
                .map(|d| ItineraryDay {
                    day_number: d.day_number.max(0) as u32,
                    title: d.title,
                    description: d.description,
                    location: d.location,
                    activities: d.activities,
                })
                .collect(),
        })
    }
}
