use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::{BatchFetchConfig, DRAFT_MODEL};

/// Pipeline configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub completion_api_key: String,
    pub completion_base_url: Option<String>,
    pub gallery_api_key: Option<String>,
    pub gallery_base_url: String,
    pub intelligence_api_key: Option<String>,
    pub intelligence_base_url: String,
    pub translate_base_url: Option<String>,
    pub draft_model: String,
    pub gallery_size: usize,
    pub fetch_group_size: usize,
    pub fetch_group_delay_ms: u64,
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            completion_api_key: env::var("COMPLETION_API_KEY")
                .context("COMPLETION_API_KEY must be set")?,
            completion_base_url: env::var("COMPLETION_BASE_URL").ok(),
            gallery_api_key: env::var("GALLERY_API_KEY").ok(),
            gallery_base_url: env::var("GALLERY_BASE_URL")
                .unwrap_or_else(|_| "https://api.pexels.com/v1".to_string()),
            intelligence_api_key: env::var("INTELLIGENCE_API_KEY").ok(),
            intelligence_base_url: env::var("INTELLIGENCE_BASE_URL")
                .unwrap_or_else(|_| "https://intelligence.waypost.app/v1".to_string()),
            translate_base_url: env::var("TRANSLATE_BASE_URL").ok(),
            draft_model: env::var("DRAFT_MODEL").unwrap_or_else(|_| DRAFT_MODEL.to_string()),
            gallery_size: env::var("GALLERY_SIZE")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .context("GALLERY_SIZE must be a valid number")?,
            fetch_group_size: env::var("FETCH_GROUP_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("FETCH_GROUP_SIZE must be a valid number")?,
            fetch_group_delay_ms: env::var("FETCH_GROUP_DELAY_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("FETCH_GROUP_DELAY_MS must be a valid number")?,
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("FETCH_TIMEOUT_SECS must be a valid number")?,
        })
    }

    pub fn batch_fetch(&self) -> BatchFetchConfig {
        BatchFetchConfig {
            group_size: self.fetch_group_size,
            group_delay: Duration::from_millis(self.fetch_group_delay_ms),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
