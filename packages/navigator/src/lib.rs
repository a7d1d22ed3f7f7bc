//! Travel answer-orchestration pipeline.
//!
//! Answers natural-language travel questions by combining a private
//! document corpus with an LLM service, falling back to generated answers
//! when the corpus is insufficient, and appending live search results when
//! the question asks about hotels, flights, or restaurants.
//!
//! Per-turn control flow:
//!
//! ```text
//! Session ─▶ GroundedAnswerer ─▶ is_insufficient ─▶ FallbackResolver
//!                                                        │
//! Session ◀─ record_turn ◀─ AugmentationSelector ◀───────┘
//! ```
//!
//! The pipeline guarantees a deterministic selection and composition
//! policy given the availability signals (sentinel phrase, trigger
//! keywords, adapter results); it makes no claims about factual
//! correctness of generated content.
//!
//! # Modules
//!
//! - [`session`] - conversation history and assistant/index identity
//! - [`answerer`] - retrieval-augmented answering over streamed runs
//! - [`sufficiency`] - sentinel-phrase insufficiency detection
//! - [`fallback`] - clarifying-question / generic-itinerary fallback
//! - [`augment`] - keyword-routed live search augmentation
//! - [`pipeline`] - the per-turn orchestration
//! - [`config`] - environment configuration
//! - [`testing`] - stubs and mocks for pipeline tests

pub mod answerer;
pub mod augment;
pub mod config;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod session;
pub mod sufficiency;
pub mod testing;

pub use answerer::{AssistantAnswerer, GroundedAnswerer};
pub use augment::AugmentationSelector;
pub use config::Config;
pub use error::{NavigatorError, Result};
pub use fallback::{ChatCompleter, Completer, FallbackResolver, FallbackStrategy};
pub use pipeline::{Navigator, TurnResult};
pub use session::{AssistantHandle, IndexHandle, Session};
pub use sufficiency::{is_insufficient, INSUFFICIENT_SENTINEL};
