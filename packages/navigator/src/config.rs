//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::fallback::FallbackStrategy;

/// Runtime configuration for the travvy binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key.
    pub openai_api_key: String,

    /// Existing vector store to reuse. When absent a new one is created.
    pub vector_store_id: Option<String>,

    /// Model for both the assistant and the fallback completions.
    pub model: String,

    /// Fallback branch to take on insufficient answers.
    pub fallback_strategy: FallbackStrategy,

    /// Token for the headless-render service. Rendered-page search routes
    /// are disabled when absent.
    pub browserless_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let fallback_strategy = match env::var("TRAVVY_FALLBACK_STRATEGY") {
            Ok(raw) => raw
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("TRAVVY_FALLBACK_STRATEGY is invalid")?,
            Err(_) => FallbackStrategy::default(),
        };

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            vector_store_id: env::var("TRAVVY_VECTOR_STORE_ID").ok(),
            model: env::var("TRAVVY_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            fallback_strategy,
            browserless_api_key: env::var("BROWSERLESS_API_KEY").ok(),
        })
    }
}
