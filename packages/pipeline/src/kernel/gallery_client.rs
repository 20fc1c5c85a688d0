//! Image-gallery service client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::BaseImageGallery;

/// REST client for the destination image-gallery service.
pub struct GalleryClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GalleryResponse {
    photos: Vec<GalleryPhoto>,
}

#[derive(Debug, Deserialize)]
struct GalleryPhoto {
    url: String,
}

impl GalleryClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
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
impl BaseImageGallery for GalleryClient {
    async fn fetch_gallery(&self, destination: &str, count: usize) -> Result<Vec<String>> {
        let url = format!(
            "{}/search/photos?query={}&per_page={}",
            self.base_url,
            urlencoding::encode(destination),
            count
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to send gallery request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gallery API error {}: {}", status, body);
        }

        let gallery: GalleryResponse = response
            .json()
            .await
            .context("Failed to parse gallery response")?;

        let urls: Vec<String> = gallery
            .photos
            .into_iter()
            .take(count)
            .map(|p| p.url)
            .collect();

        debug!(destination = %destination, count = urls.len(), "Fetched gallery");

        Ok(urls)
    }
}

/// No-op gallery for environments without an image API key.
pub struct NoopImageGallery;

#[async_trait]
impl BaseImageGallery for NoopImageGallery {
    async fn fetch_gallery(&self, _destination: &str, _count: usize) -> Result<Vec<String>> {
        tracing::warn!("NoopImageGallery: fetch_gallery called but no gallery API key configured");
        Ok(vec![])
    }
}
