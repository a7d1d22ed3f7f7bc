//! Live travel search adapters.
//!
//! Two kinds of adapter behind one `SnippetSearcher` trait:
//!
//! - **Web snippet search**: a single stateless GET against DuckDuckGo's
//!   instant-answer endpoint, returning abstract/related-topic snippets.
//! - **Rendered travel-site search**: deterministic Kayak URLs fetched
//!   through a remote headless-render service, with result cards parsed
//!   into provider/price snippets.
//!
//! Both are pure lookups: no state, no persistence, and "no results" is an
//! empty list rather than an error. The fragile markup-dependent parsing
//! lives entirely behind the adapter interface so the parsing strategy can
//! be swapped without touching callers.
//!
//! # Modules
//!
//! - [`searcher`] - `Snippet`, the `SnippetSearcher` trait, and a mock
//! - [`duckduckgo`] - instant-answer web snippets
//! - [`kayak`] - rendered hotel/flight result cards
//! - [`render`] - remote headless-render client
//! - [`security`] - credential handling

pub mod duckduckgo;
pub mod error;
pub mod kayak;
pub mod render;
pub mod searcher;
pub mod security;

pub use duckduckgo::DuckDuckGoSearcher;
pub use error::{RenderError, SearchError};
pub use kayak::{FlightSearchParams, KayakFlightSearcher, KayakHotelSearcher, StaySearchParams};
pub use render::{BrowserlessRenderer, MockPageRenderer, PageRenderer};
pub use searcher::{MockSnippetSearcher, Snippet, SnippetSearcher};
pub use security::SecretString;
