//! DuckDuckGo instant-answer searcher.
//!
//! Single stateless GET against the public instant-answer endpoint. Pulls
//! the abstract and related-topic texts into snippets. Missing fields mean
//! fewer snippets, not errors.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::SearchError;
use crate::searcher::{Snippet, SnippetSearcher};

const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Instant-answer response. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,

    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Related topics arrive either as plain entries or as named groups
/// holding a nested topic list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    // Entry requires `Text` so that named groups fall through to `Group`.
    Entry {
        #[serde(rename = "Text")]
        text: String,
    },
    Group {
        #[serde(rename = "Topics", default)]
        topics: Vec<TopicEntry>,
    },
}

#[derive(Debug, Deserialize)]
struct TopicEntry {
    #[serde(rename = "Text")]
    text: Option<String>,
}

/// Web snippet searcher backed by DuckDuckGo's instant-answer API.
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
}

impl Default for DuckDuckGoSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoSearcher {
    /// Create a new searcher. No API key required.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    fn answer_to_snippets(answer: InstantAnswer) -> Vec<Snippet> {
        let mut snippets = Vec::new();

        if !answer.abstract_text.trim().is_empty() {
            snippets.push(Snippet::text(answer.abstract_text));
        }

        for topic in answer.related_topics {
            match topic {
                RelatedTopic::Entry { text } => {
                    if !text.trim().is_empty() {
                        snippets.push(Snippet::text(text));
                    }
                }
                RelatedTopic::Group { topics } => {
                    for entry in topics {
                        if let Some(text) = entry.text.filter(|t| !t.trim().is_empty()) {
                            snippets.push(Snippet::text(text));
                        }
                    }
                }
            }
        }

        snippets
    }
}

#[async_trait]
impl SnippetSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str) -> Result<Vec<Snippet>, SearchError> {
        let response = self
            .client
            .get(DUCKDUCKGO_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let answer: InstantAnswer = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let snippets = Self::answer_to_snippets(answer);
        tracing::debug!(query, count = snippets.len(), "DuckDuckGo instant answer");
        Ok(snippets)
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }
}
