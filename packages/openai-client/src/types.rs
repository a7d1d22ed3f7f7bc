//! OpenAI API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion
// =============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4o", "gpt-4o-mini")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in the completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Response content
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Raw chat response from API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageResponse {
    pub content: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,
}

// =============================================================================
// Assistants v2
// =============================================================================

/// Request to create an assistant bound to a vector store.
#[derive(Debug, Clone)]
pub struct CreateAssistantRequest {
    /// Display name for the assistant
    pub name: String,

    /// System instructions (these are where the sufficiency contract lives)
    pub instructions: String,

    /// Model to use
    pub model: String,

    /// Vector store the `file_search` tool reads from
    pub vector_store_id: String,
}

impl CreateAssistantRequest {
    /// Serialize into the Assistants v2 wire format.
    pub(crate) fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "instructions": self.instructions,
            "model": self.model,
            "tools": [{"type": "file_search"}],
            "tool_resources": {
                "file_search": {"vector_store_ids": [self.vector_store_id]}
            }
        })
    }
}

/// A configured assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
    /// Assistant id ("asst_...")
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Model the assistant runs on
    pub model: String,
}

/// A conversation thread.
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    /// Thread id ("thread_...")
    pub id: String,
}

// =============================================================================
// Vector Stores & Files
// =============================================================================

/// An indexed document corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorStore {
    /// Vector store id ("vs_...")
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// An uploaded file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileObject {
    /// File id ("file-...")
    pub id: String,

    /// Original filename
    pub filename: String,
}

/// A file attached to a vector store.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreFile {
    /// Attachment id
    pub id: String,

    /// Indexing status ("in_progress", "completed", "failed")
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let sys = Message::system("You are helpful");
        assert_eq!(sys.role, "system");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");

        let assistant = Message::assistant("Hi there");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_chat_request_builder() {
        let req = ChatRequest::new("gpt-4o")
            .message(Message::user("Hello"))
            .temperature(0.7)
            .max_tokens(100);

        assert_eq!(req.model, "gpt-4o");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.max_tokens, Some(100));
    }

    #[test]
    fn test_create_assistant_body() {
        let req = CreateAssistantRequest {
            name: "Navigator".into(),
            instructions: "Be precise.".into(),
            model: "gpt-4o".into(),
            vector_store_id: "vs_123".into(),
        };

        let body = req.to_body();
        assert_eq!(body["tools"][0]["type"], "file_search");
        assert_eq!(
            body["tool_resources"]["file_search"]["vector_store_ids"][0],
            "vs_123"
        );
    }
}
