//! Typed errors for the travel-search adapters.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Zero results is never an error anywhere in this crate. Adapters only
//! fail on transport problems; a page that parses to nothing yields an
//! empty snippet list.

use thiserror::Error;

/// Errors from a search adapter.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Upstream returned a non-2xx status
    #[error("search API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Rendered-page fetch failed underneath the adapter
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// Errors from the remote headless-render service.
#[derive(Debug, Error)]
pub enum RenderError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Render service returned a non-2xx status
    #[error("render API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Render did not settle within the deadline
    #[error("timeout rendering: {url}")]
    Timeout { url: String },
}
