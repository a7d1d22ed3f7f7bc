//! Typed errors for the answer pipeline.

use openai_client::OpenAIError;
use thiserror::Error;
use travel_search::{RenderError, SearchError};

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, NavigatorError>;

/// Errors surfaced by the answer pipeline.
///
/// All variants propagate untouched: no retry, no backoff. The caller
/// presents the error and lets the user resubmit. Search and render
/// failures only surface when an adapter is driven directly; during
/// augmentation they degrade to "no section appended" instead.
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// The grounded-assistant call failed
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] OpenAIError),

    /// The fallback LLM call failed
    #[error("fallback generation failed: {0}")]
    Fallback(#[source] OpenAIError),

    /// A search adapter transport failure (zero results is not an error)
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// The headless-render call failed or timed out
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
