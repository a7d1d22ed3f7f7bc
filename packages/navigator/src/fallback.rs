//! Fallback policy engine.
//!
//! When the grounded answer is insufficient, exactly one fallback strategy
//! runs: ask the user a clarifying question, or generate a generic
//! itinerary from general travel knowledge. The strategies are never
//! combined within a turn, and a grounded answer always passes through
//! unchanged.
//!
//! The default strategy is `GenericItinerary`, matching the behavior the
//! rest of the pipeline was built around; `Clarify` is selectable via
//! configuration.

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::error::{NavigatorError, Result};

/// Token budget for a clarifying question.
const CLARIFY_MAX_TOKENS: u32 = 50;

/// Token budget for a generic itinerary.
const ITINERARY_MAX_TOKENS: u32 = 500;

/// Which fallback branch to take when the grounded answer is insufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStrategy {
    /// Ask one concise follow-up question about missing trip parameters.
    Clarify,

    /// Generate a structured itinerary from general travel knowledge.
    GenericItinerary,
}

impl Default for FallbackStrategy {
    fn default() -> Self {
        Self::GenericItinerary
    }
}

impl FallbackStrategy {
    /// The fixed instruction template for this strategy.
    fn prompt(&self, question: &str) -> String {
        match self {
            Self::Clarify => format!(
                "You are a seasoned travel expert. The user asked:\n\n\
                 \"{}\"\n\n\
                 What is one clear and concise question you would ask to get \
                 additional details (e.g., dates, duration, number of nights) \
                 for a complete itinerary?",
                question
            ),
            Self::GenericItinerary => format!(
                "You are an expert travel planner. The user asked: \"{}\". \
                 Please create a detailed step-by-step travel itinerary \
                 including attractions, durations, and tips.",
                question
            ),
        }
    }

    /// Output token bound for this strategy.
    fn max_tokens(&self) -> u32 {
        match self {
            Self::Clarify => CLARIFY_MAX_TOKENS,
            Self::GenericItinerary => ITINERARY_MAX_TOKENS,
        }
    }
}

impl FromStr for FallbackStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clarify" => Ok(Self::Clarify),
            "itinerary" => Ok(Self::GenericItinerary),
            other => Err(format!(
                "unknown fallback strategy '{}' (expected 'clarify' or 'itinerary')",
                other
            )),
        }
    }
}

/// Single-completion backend used by the fallback branches.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Run one completion for the prompt, bounded to `max_tokens` output tokens.
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<String, OpenAIError>;
}

/// Chat-completion backend over the OpenAI client.
pub struct ChatCompleter {
    client: OpenAIClient,
    model: String,
}

impl ChatCompleter {
    /// Create a completer for the given model.
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Completer for ChatCompleter {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<String, OpenAIError> {
        let request = ChatRequest::new(&self.model)
            .message(Message::user(prompt))
            .max_tokens(max_tokens);

        let response = self.client.chat_completion(request).await?;
        Ok(response.content.trim().to_string())
    }
}

/// Resolves the final answer for a turn from the insufficiency verdict.
pub struct FallbackResolver {
    completer: Arc<dyn Completer>,
    strategy: FallbackStrategy,
}

impl FallbackResolver {
    /// Create a resolver with the given strategy.
    pub fn new(completer: Arc<dyn Completer>, strategy: FallbackStrategy) -> Self {
        Self {
            completer,
            strategy,
        }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> FallbackStrategy {
        self.strategy
    }

    /// Resolve the turn's answer.
    ///
    /// Grounded answers pass through unchanged. Insufficient answers are
    /// replaced entirely by the output of exactly one fallback completion;
    /// there is no retry against the document index within the turn.
    pub async fn resolve(
        &self,
        question: &str,
        grounded_answer: String,
        insufficient: bool,
    ) -> Result<String> {
        if !insufficient {
            return Ok(grounded_answer);
        }

        info!(strategy = ?self.strategy, "Grounded answer insufficient, running fallback");

        self.completer
            .complete(&self.strategy.prompt(question), self.strategy.max_tokens())
            .await
            .map_err(NavigatorError::Fallback)
    }
}
