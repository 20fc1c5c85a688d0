//! Location-intelligence service client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{LocationIntelligence, PointOfInterest};

use super::BaseLocationIntelligence;

/// REST client for the location-intelligence service (POIs + activities per
/// destination).
pub struct IntelligenceClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct IntelligenceRequest<'a> {
    destination: &'a str,
}

#[derive(Debug, Deserialize)]
struct IntelligenceResponse {
    location: String,
    #[serde(default)]
    pois: Vec<PoiRow>,
    #[serde(default)]
    activities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PoiRow {
    name: String,
    #[serde(default)]
    category: Option<String>,
}

impl IntelligenceClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            base_url,
            client,
        })
    }
}

#[async_trait]
impl BaseLocationIntelligence for IntelligenceClient {
    async fn get_intelligence(&self, destination: &str) -> Result<LocationIntelligence> {
        let response = self
            .client
            .post(format!("{}/intelligence", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&IntelligenceRequest { destination })
            .send()
            .await
            .context("Failed to send intelligence request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Intelligence API error {}: {}", status, body);
        }

        let parsed: IntelligenceResponse = response
            .json()
            .await
            .context("Failed to parse intelligence response")?;

        Ok(LocationIntelligence {
            location: parsed.location,
            pois: parsed
                .pois
                .into_iter()
                .map(|p| PointOfInterest {
                    name: p.name,
                    category: p.category,
                })
                .collect(),
            activities: parsed.activities,
        })
    }
}

/// No-op intelligence service; contexts are built without POI data.
pub struct NoopLocationIntelligence;

#[async_trait]
impl BaseLocationIntelligence for NoopLocationIntelligence {
    async fn get_intelligence(&self, destination: &str) -> Result<LocationIntelligence> {
        tracing::warn!(
            destination = %destination,
            "NoopLocationIntelligence: no intelligence service configured"
        );
        Ok(LocationIntelligence {
            location: destination.to_string(),
            pois: vec![],
            activities: vec![],
        })
    }
}
