//! Retrieval-augmented answerer.
//!
//! Sends the conversation history plus the new question to the grounded
//! assistant and assembles the answer from the streamed run. The trait
//! seam exists so the pipeline can be tested against a stub without
//! network calls.

use async_trait::async_trait;
use futures::StreamExt;
use openai_client::{Message, OpenAIClient, MESSAGE_DELTA_EVENT};
use tracing::{debug, info};

use crate::error::{NavigatorError, Result};
use crate::session::AssistantHandle;

/// Produces a document-grounded answer for one turn.
#[async_trait]
pub trait GroundedAnswerer: Send + Sync {
    /// Answer `question` given the accumulated `history`.
    ///
    /// Must not mutate the caller's history; the question is appended to a
    /// copy. Blocks until the remote stream completes.
    async fn answer(&self, history: &[Message], question: &str) -> Result<String>;
}

/// OpenAI Assistants implementation of [`GroundedAnswerer`].
pub struct AssistantAnswerer {
    client: OpenAIClient,
    assistant: AssistantHandle,
}

impl AssistantAnswerer {
    /// Create an answerer for a configured assistant.
    pub fn new(client: OpenAIClient, assistant: AssistantHandle) -> Self {
        Self { client, assistant }
    }
}

#[async_trait]
impl GroundedAnswerer for AssistantAnswerer {
    async fn answer(&self, history: &[Message], question: &str) -> Result<String> {
        let mut messages = history.to_vec();
        messages.push(Message::user(question));

        // A fresh thread per turn; the full history rides along each time.
        let thread = self
            .client
            .create_thread(&messages)
            .await
            .map_err(NavigatorError::Retrieval)?;

        debug!(
            thread_id = %thread.id,
            message_count = messages.len(),
            "Thread created for grounded answer"
        );

        let mut stream = self
            .client
            .stream_run(&thread.id, self.assistant.as_str())
            .await
            .map_err(NavigatorError::Retrieval)?;

        // Exact byte concatenation of message deltas, in arrival order.
        let mut answer = String::new();
        while let Some(event) = stream.next().await {
            let event = event.map_err(NavigatorError::Retrieval)?;
            if event.event == MESSAGE_DELTA_EVENT {
                answer.push_str(&event.delta);
            }
            if event.done {
                break;
            }
        }

        info!(
            thread_id = %thread.id,
            answer_len = answer.len(),
            "Grounded answer assembled"
        );

        Ok(answer)
    }
}
