//! Kayak rendered-page searchers.
//!
//! Builds deterministic Kayak URLs from stay/flight parameters, fetches the
//! fully-rendered result page through a `PageRenderer`, and parses result
//! cards into provider/price snippets by class matching.
//!
//! The card selectors track Kayak's generated class names and will break
//! when the upstream markup changes. A parse miss is an empty result list,
//! not an error; only the render fetch itself can fail.
//!
//! Search parameters are fixed defaults rather than values extracted from
//! the question text. Known demo limitation, carried deliberately.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;

use crate::error::SearchError;
use crate::render::PageRenderer;
use crate::searcher::{Snippet, SnippetSearcher};

const KAYAK_BASE_URL: &str = "https://www.kayak.co.in";

/// Hotel search parameters.
#[derive(Debug, Clone)]
pub struct StaySearchParams {
    /// Location slug in Kayak's path convention (e.g., "new-york").
    pub location: String,
    /// Check-in date, YYYY-MM-DD.
    pub checkin: String,
    /// Check-out date, YYYY-MM-DD.
    pub checkout: String,
    /// Number of adults.
    pub adults: u32,
}

impl Default for StaySearchParams {
    fn default() -> Self {
        Self {
            location: "new-york".to_string(),
            checkin: "2025-06-01".to_string(),
            checkout: "2025-06-05".to_string(),
            adults: 2,
        }
    }
}

impl StaySearchParams {
    /// Kayak hotel-results URL for these parameters.
    pub fn url(&self) -> String {
        format!(
            "{}/hotels/{}/{}/{}/{}adults",
            KAYAK_BASE_URL, self.location, self.checkin, self.checkout, self.adults
        )
    }
}

/// Flight search parameters.
#[derive(Debug, Clone)]
pub struct FlightSearchParams {
    /// Origin airport code (e.g., "JFK").
    pub origin: String,
    /// Destination airport code (e.g., "LAX").
    pub destination: String,
    /// Departure date, YYYY-MM-DD.
    pub depart: String,
    /// Return date, YYYY-MM-DD.
    pub return_date: String,
}

impl Default for FlightSearchParams {
    fn default() -> Self {
        Self {
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            depart: "2025-06-01".to_string(),
            return_date: "2025-06-05".to_string(),
        }
    }
}

impl FlightSearchParams {
    /// Kayak flight-results URL for these parameters.
    pub fn url(&self) -> String {
        format!(
            "{}/flights/{}-{}/{}/{}",
            KAYAK_BASE_URL, self.origin, self.destination, self.depart, self.return_date
        )
    }
}

/// Parse result cards out of a rendered Kayak page.
///
/// Looks for result containers and pulls a provider name and price from
/// each. Cards missing either field are skipped.
fn parse_result_cards(html: &str, name_selector: &str, price_selector: &str) -> Vec<Snippet> {
    // Selectors are compile-time constants in practice; a bad one means no cards.
    let Ok(card_sel) = Selector::parse("div[class*=resultInner]") else {
        return Vec::new();
    };
    let Ok(name_sel) = Selector::parse(name_selector) else {
        return Vec::new();
    };
    let Ok(price_sel) = Selector::parse(price_selector) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut snippets = Vec::new();

    for card in document.select(&card_sel) {
        let name = card
            .select(&name_sel)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());
        let price = card
            .select(&price_sel)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());

        if let (Some(name), Some(price)) = (name, price) {
            if !name.is_empty() && !price.is_empty() {
                snippets.push(Snippet::labeled(name, price));
            }
        }
    }

    snippets
}

/// Hotel searcher over rendered Kayak result pages.
pub struct KayakHotelSearcher {
    renderer: Arc<dyn PageRenderer>,
    params: StaySearchParams,
}

impl KayakHotelSearcher {
    /// Create a hotel searcher with default stay parameters.
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            renderer,
            params: StaySearchParams::default(),
        }
    }

    /// Override the stay parameters.
    pub fn with_params(mut self, params: StaySearchParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl SnippetSearcher for KayakHotelSearcher {
    async fn search(&self, _query: &str) -> Result<Vec<Snippet>, SearchError> {
        let url = self.params.url();
        tracing::info!(%url, "Kayak hotel search");

        let html = self.renderer.render(&url).await?;
        let snippets =
            parse_result_cards(&html, "[class*=hotelName]", "[class*=price-text]");

        tracing::debug!(count = snippets.len(), "Kayak hotel cards parsed");
        Ok(snippets)
    }

    fn name(&self) -> &str {
        "kayak-hotels"
    }
}

/// Flight searcher over rendered Kayak result pages.
pub struct KayakFlightSearcher {
    renderer: Arc<dyn PageRenderer>,
    params: FlightSearchParams,
}

impl KayakFlightSearcher {
    /// Create a flight searcher with default flight parameters.
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            renderer,
            params: FlightSearchParams::default(),
        }
    }

    /// Override the flight parameters.
    pub fn with_params(mut self, params: FlightSearchParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl SnippetSearcher for KayakFlightSearcher {
    async fn search(&self, _query: &str) -> Result<Vec<Snippet>, SearchError> {
        let url = self.params.url();
        tracing::info!(%url, "Kayak flight search");

        let html = self.renderer.render(&url).await?;
        let snippets =
            parse_result_cards(&html, "[class*=airline-name]", "[class*=price-text]");

        tracing::debug!(count = snippets.len(), "Kayak flight cards parsed");
        Ok(snippets)
    }

    fn name(&self) -> &str {
        "kayak-flights"
    }
}
