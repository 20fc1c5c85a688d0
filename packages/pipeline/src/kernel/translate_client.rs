//! Translation service client and script detection.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BaseTranslator;

/// REST client for the translation service.
pub struct TranslateClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_script: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated: String,
}

impl TranslateClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl BaseTranslator for TranslateClient {
    async fn translate(&self, text: &str, target_script: Option<&str>) -> Result<String> {
        let request = TranslateRequest {
            text,
            target_script: target_script.unwrap_or("latin"),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to send translation request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Translation API error {}: {}", status, body);
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        Ok(parsed.translated)
    }
}

/// No-op translator: passes text through unchanged.
pub struct NoopTranslator;

#[async_trait]
impl BaseTranslator for NoopTranslator {
    async fn translate(&self, text: &str, _target_script: Option<&str>) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Whether the text contains characters outside the Latin script (and its
/// common punctuation/digits).
pub fn has_non_latin(text: &str) -> bool {
    text.chars().any(|c| {
        c.is_alphabetic() && !c.is_ascii_alphabetic() && !matches!(c, '\u{00C0}'..='\u{024F}')
    })
}
