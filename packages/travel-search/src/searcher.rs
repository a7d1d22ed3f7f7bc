//! Snippet searcher trait for live travel lookups.
//!
//! Abstracts over search providers (instant-answer APIs, rendered travel
//! sites) so the answer pipeline can append live results without knowing
//! where they come from. Implementations are stateless: one call, zero or
//! more snippets back.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::error::SearchError;

/// A small fragment of search-result text.
///
/// Either a labeled value (e.g., an airline name and a price) or a bare
/// text snippet from a generic web search. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Label for the value (e.g., a hotel or airline name).
    pub label: Option<String>,

    /// The snippet text (e.g., a price or an abstract).
    pub text: String,
}

impl Snippet {
    /// Create a bare text snippet.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
        }
    }

    /// Create a labeled snippet.
    pub fn labeled(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            text: text.into(),
        }
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Search trait for live lookups.
///
/// # Implementations
///
/// - `DuckDuckGoSearcher` - instant-answer web snippets
/// - `KayakHotelSearcher` / `KayakFlightSearcher` - rendered travel-site cards
/// - `MockSnippetSearcher` - for testing
#[async_trait]
pub trait SnippetSearcher: Send + Sync {
    /// Execute one lookup for the query.
    ///
    /// Returns zero or more snippets. "No results" is an empty list,
    /// never an error; `SearchError` is reserved for transport failure.
    async fn search(&self, query: &str) -> Result<Vec<Snippet>, SearchError>;

    /// Search and cap the result count.
    async fn search_with_limit(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Snippet>, SearchError> {
        let mut snippets = self.search(query).await?;
        snippets.truncate(limit);
        Ok(snippets)
    }

    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;
}

/// Mock snippet searcher for testing.
#[derive(Default)]
pub struct MockSnippetSearcher {
    results: RwLock<HashMap<String, Vec<Snippet>>>,
    fail: RwLock<bool>,
}

impl MockSnippetSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: &str, results: Vec<Snippet>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Make every call fail with a transport error.
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }
}

#[async_trait]
impl SnippetSearcher for MockSnippetSearcher {
    async fn search(&self, query: &str) -> Result<Vec<Snippet>, SearchError> {
        if *self.fail.read().unwrap() {
            return Err(SearchError::Api {
                status: 503,
                message: "mock transport failure".into(),
            });
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
