//! Remote headless-render client.
//!
//! Travel-site results only exist after client-side JavaScript runs, so the
//! rendered-page adapters fetch through a remote headless-browser service
//! rather than plain HTTP. This is a slow, blocking operation: the service
//! holds the page open for a settle delay before returning the final HTML.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use crate::error::RenderError;
use crate::security::SecretString;

const DEFAULT_RENDER_URL: &str = "https://chrome.browserless.io";

/// Settle delay before the service captures the page, in milliseconds.
/// Kayak result pages keep loading cards for tens of seconds.
const DEFAULT_SETTLE_MS: u64 = 25_000;

/// Client timeout. Must comfortably exceed the settle delay.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Fetches fully-rendered page HTML after dynamic content has loaded.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render the URL and return the final page HTML.
    async fn render(&self, url: &str) -> Result<String, RenderError>;
}

/// Renderer backed by a browserless-style HTTP service.
///
/// POSTs the target URL to the service's `/content` endpoint and waits for
/// the rendered document.
pub struct BrowserlessRenderer {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    settle_ms: u64,
}

impl BrowserlessRenderer {
    /// Create a new renderer with the given API token.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: SecretString::new(api_key),
            base_url: DEFAULT_RENDER_URL.to_string(),
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }

    /// Create from environment variable `BROWSERLESS_API_KEY`.
    pub fn from_env() -> Result<Self, RenderError> {
        let api_key = std::env::var("BROWSERLESS_API_KEY").map_err(|_| RenderError::Api {
            status: 0,
            message: "BROWSERLESS_API_KEY environment variable not set".into(),
        })?;
        Ok(Self::new(api_key))
    }

    /// Point at a self-hosted render service.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the settle delay (milliseconds).
    pub fn with_settle_ms(mut self, settle_ms: u64) -> Self {
        self.settle_ms = settle_ms;
        self
    }
}

#[async_trait]
impl PageRenderer for BrowserlessRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        tracing::info!(url, settle_ms = self.settle_ms, "Rendering page");
        let start = std::time::Instant::now();

        let body = serde_json::json!({
            "url": url,
            "gotoOptions": { "waitUntil": "networkidle2" },
            "waitForTimeout": self.settle_ms,
        });

        let response = self
            .client
            .post(format!("{}/content", self.base_url))
            .query(&[("token", self.api_key.expose())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RenderError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    RenderError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| RenderError::Http(Box::new(e)))?;

        tracing::info!(
            url,
            bytes = html.len(),
            duration_ms = start.elapsed().as_millis(),
            "Page rendered"
        );

        Ok(html)
    }
}

/// Mock renderer for testing.
#[derive(Default)]
pub struct MockPageRenderer {
    pages: RwLock<HashMap<String, String>>,
    fail: RwLock<bool>,
}

impl MockPageRenderer {
    /// Create a new mock renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve canned HTML for a URL.
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), html.to_string());
        self
    }

    /// Make every render fail with a timeout.
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }
}

#[async_trait]
impl PageRenderer for MockPageRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        if *self.fail.read().unwrap() {
            return Err(RenderError::Timeout {
                url: url.to_string(),
            });
        }

        Ok(self
            .pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default())
    }
}
