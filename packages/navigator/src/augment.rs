//! Augmentation selector.
//!
//! Independent of the grounded/insufficient verdict, the question is
//! scanned for trigger keywords; matched routes run their search adapter
//! and append a labeled section of results to whatever answer the turn
//! produced. Augmentation is best-effort: adapter failures are logged and
//! skipped, never fatal to the turn.
//!
//! Routes live in an explicit table so the keyword-to-adapter contract
//! stays in one place, with a fixed, deterministic section order.

use std::sync::Arc;
use tracing::{debug, warn};

use travel_search::{
    DuckDuckGoSearcher, KayakFlightSearcher, KayakHotelSearcher, PageRenderer, SnippetSearcher,
};

/// Cap on entries per appended section.
const MAX_SNIPPETS_PER_SECTION: usize = 5;

/// One keyword-to-adapter mapping.
struct AugmentRoute {
    keywords: Vec<&'static str>,
    heading: &'static str,
    searcher: Arc<dyn SnippetSearcher>,
}

impl AugmentRoute {
    /// Case-insensitive whole-word keyword match against the question.
    fn matches(&self, question: &str) -> bool {
        let lowered = question.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| self.keywords.contains(&word))
    }
}

/// Appends live search sections to an answer based on question keywords.
#[derive(Default)]
pub struct AugmentationSelector {
    routes: Vec<AugmentRoute>,
}

impl AugmentationSelector {
    /// Create a selector with no routes (augmentation disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Routes are applied in insertion order.
    pub fn with_route(
        mut self,
        keywords: &[&'static str],
        heading: &'static str,
        searcher: Arc<dyn SnippetSearcher>,
    ) -> Self {
        self.routes.push(AugmentRoute {
            keywords: keywords.to_vec(),
            heading,
            searcher,
        });
        self
    }

    /// The standard route table: hotel, then flight, then restaurant.
    ///
    /// Hotel and flight route through rendered Kayak pages and are only
    /// installed when a renderer is available; restaurant lookups use the
    /// keyless instant-answer API and are always on.
    pub fn standard(renderer: Option<Arc<dyn PageRenderer>>) -> Self {
        let mut selector = Self::new();

        if let Some(renderer) = renderer {
            selector = selector
                .with_route(
                    &["hotel", "hotels"],
                    "Hotel Search Result",
                    Arc::new(KayakHotelSearcher::new(renderer.clone())),
                )
                .with_route(
                    &["flight", "flights"],
                    "Flight Search Result",
                    Arc::new(KayakFlightSearcher::new(renderer)),
                );
        }

        selector.with_route(
            &["restaurant", "restaurants"],
            "Restaurant Search Result",
            Arc::new(DuckDuckGoSearcher::new()),
        )
    }

    /// Append matched sections to `base_answer`.
    ///
    /// Returns the (possibly unchanged) answer and whether anything was
    /// appended. Sections appear in route-table order, each separated from
    /// the preceding text by a blank line and capped at five entries.
    pub async fn augment(&self, question: &str, base_answer: &str) -> (String, bool) {
        let mut answer = base_answer.to_string();
        let mut augmented = false;

        for route in &self.routes {
            if !route.matches(question) {
                continue;
            }

            debug!(
                adapter = route.searcher.name(),
                heading = route.heading,
                "Augmentation keyword matched"
            );

            let snippets = match route
                .searcher
                .search_with_limit(question, MAX_SNIPPETS_PER_SECTION)
                .await
            {
                Ok(snippets) => snippets,
                Err(e) => {
                    // Best-effort: a failed adapter never aborts the turn.
                    warn!(
                        adapter = route.searcher.name(),
                        error = %e,
                        "Augmentation search failed, skipping section"
                    );
                    continue;
                }
            };

            if snippets.is_empty() {
                continue;
            }

            answer.push_str("\n\n");
            answer.push_str(route.heading);
            answer.push_str(":\n");
            let lines: Vec<String> = snippets.iter().map(|s| s.to_string()).collect();
            answer.push_str(&lines.join("\n"));
            augmented = true;
        }

        (answer, augmented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_search::{MockSnippetSearcher, Snippet};

    fn hotel_route(selector: AugmentationSelector, snippets: Vec<Snippet>) -> AugmentationSelector {
        let searcher =
            MockSnippetSearcher::new().with_results("Find me a hotel in Paris", snippets);
        selector.with_route(&["hotel", "hotels"], "Hotel Search Result", Arc::new(searcher))
    }

    #[tokio::test]
    async fn test_no_keyword_is_identity() {
        let selector = hotel_route(
            AugmentationSelector::new(),
            vec![Snippet::labeled("Ritz", "$900")],
        );

        let (answer, augmented) = selector
            .augment("What is the refund policy?", "Base answer.")
            .await;

        assert_eq!(answer, "Base answer.");
        assert!(!augmented);
    }

    #[tokio::test]
    async fn test_single_keyword_appends_one_section() {
        let selector = hotel_route(
            AugmentationSelector::new(),
            vec![
                Snippet::labeled("Ritz", "$900"),
                Snippet::labeled("Ibis", "$80"),
            ],
        );

        let (answer, augmented) = selector
            .augment("Find me a hotel in Paris", "Base answer.")
            .await;

        assert!(answer.starts_with("Base answer."));
        assert_eq!(answer.matches("Search Result:").count(), 1);
        assert_eq!(
            answer,
            "Base answer.\n\nHotel Search Result:\nRitz: $900\nIbis: $80"
        );
        assert!(augmented);
    }

    #[tokio::test]
    async fn test_sections_capped_at_five_entries() {
        let snippets: Vec<_> = (0..9)
            .map(|i| Snippet::labeled(format!("Hotel {}", i), "$100"))
            .collect();
        let selector = hotel_route(AugmentationSelector::new(), snippets);

        let (answer, _) = selector
            .augment("Find me a hotel in Paris", "Base.")
            .await;

        assert_eq!(answer.matches("$100").count(), 5);
    }

    #[tokio::test]
    async fn test_zero_results_is_a_no_op() {
        let selector = hotel_route(AugmentationSelector::new(), Vec::new());

        let (answer, augmented) = selector
            .augment("Find me a hotel in Paris", "Base answer.")
            .await;

        assert_eq!(answer, "Base answer.");
        assert!(!augmented);
    }

    #[tokio::test]
    async fn test_adapter_failure_degrades_to_no_section() {
        let selector = AugmentationSelector::new().with_route(
            &["hotel", "hotels"],
            "Hotel Search Result",
            Arc::new(MockSnippetSearcher::new().failing()),
        );

        let (answer, augmented) = selector
            .augment("Find me a hotel in Paris", "Base answer.")
            .await;

        assert_eq!(answer, "Base answer.");
        assert!(!augmented);
    }

    #[tokio::test]
    async fn test_sections_appended_in_fixed_order() {
        let hotel = MockSnippetSearcher::new()
            .with_results("hotel and flight to rome", vec![Snippet::labeled("Inn", "$50")]);
        let flight = MockSnippetSearcher::new()
            .with_results("hotel and flight to rome", vec![Snippet::labeled("AirX", "$320")]);

        let selector = AugmentationSelector::new()
            .with_route(&["hotel", "hotels"], "Hotel Search Result", Arc::new(hotel))
            .with_route(&["flight", "flights"], "Flight Search Result", Arc::new(flight));

        let (answer, augmented) = selector.augment("hotel and flight to rome", "Base.").await;

        assert!(augmented);
        let hotel_pos = answer.find("Hotel Search Result:").unwrap();
        let flight_pos = answer.find("Flight Search Result:").unwrap();
        assert!(hotel_pos < flight_pos);
    }

    #[tokio::test]
    async fn test_keyword_match_is_whole_word() {
        let selector = hotel_route(
            AugmentationSelector::new(),
            vec![Snippet::labeled("Ritz", "$900")],
        );

        // "hotelier" must not trigger the hotel route
        let (answer, augmented) = selector
            .augment("Tell me about a famous hotelier", "Base.")
            .await;

        assert_eq!(answer, "Base.");
        assert!(!augmented);
    }
}
