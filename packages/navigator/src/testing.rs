//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real assistant or LLM calls.

use async_trait::async_trait;
use openai_client::{Message, OpenAIError};
use std::sync::{Arc, RwLock};

use crate::answerer::GroundedAnswerer;
use crate::error::{NavigatorError, Result};
use crate::fallback::Completer;

/// Record of one call made to [`StubAnswerer`].
#[derive(Debug, Clone)]
pub struct AnswererCall {
    /// Snapshot of the history the answerer was invoked with.
    pub history: Vec<Message>,

    /// The question for that call.
    pub question: String,
}

/// A stub grounded answerer returning a fixed string.
#[derive(Default)]
pub struct StubAnswerer {
    response: String,
    fail: bool,
    calls: Arc<RwLock<Vec<AnswererCall>>>,
}

impl StubAnswerer {
    /// Always answer with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
            calls: Arc::default(),
        }
    }

    /// Fail every call with a retrieval error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<AnswererCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl GroundedAnswerer for StubAnswerer {
    async fn answer(&self, history: &[Message], question: &str) -> Result<String> {
        self.calls.write().unwrap().push(AnswererCall {
            history: history.to_vec(),
            question: question.to_string(),
        });

        if self.fail {
            return Err(NavigatorError::Retrieval(OpenAIError::Network(
                "stub retrieval failure".into(),
            )));
        }

        Ok(self.response.clone())
    }
}

/// Record of one call made to [`MockCompleter`].
#[derive(Debug, Clone)]
pub struct CompleterCall {
    /// The prompt passed in.
    pub prompt: String,

    /// The output token bound passed in.
    pub max_tokens: u32,
}

/// A mock completion backend returning a fixed string.
#[derive(Default)]
pub struct MockCompleter {
    response: String,
    calls: Arc<RwLock<Vec<CompleterCall>>>,
}

impl MockCompleter {
    /// Always complete with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Arc::default(),
        }
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<CompleterCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<String, OpenAIError> {
        self.calls.write().unwrap().push(CompleterCall {
            prompt: prompt.to_string(),
            max_tokens,
        });
        Ok(self.response.clone())
    }
}

/// A completion backend that always fails.
pub struct FailingCompleter;

#[async_trait]
impl Completer for FailingCompleter {
    async fn complete(
        &self,
        _prompt: &str,
        _max_tokens: u32,
    ) -> std::result::Result<String, OpenAIError> {
        Err(OpenAIError::Api("mock completion failure".into()))
    }
}
