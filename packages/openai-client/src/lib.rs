//! Pure OpenAI REST API client
//!
//! A clean, minimal client for the OpenAI API with no domain-specific logic.
//! Supports chat completions, Assistants v2 (threads and streamed runs), and
//! vector stores.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//! use futures::StreamExt;
//!
//! let client = OpenAIClient::from_env()?;
//!
//! // Chat completion
//! let response = client.chat_completion(ChatRequest {
//!     model: "gpt-4o".into(),
//!     messages: vec![Message::user("Hello!")],
//!     ..Default::default()
//! }).await?;
//!
//! // Streamed assistant run over a document corpus
//! let thread = client.create_thread(&[Message::user("What is the refund policy?")]).await?;
//! let mut stream = client.stream_run(&thread.id, "asst_abc").await?;
//! while let Some(event) = stream.next().await {
//!     let event = event?;
//!     print!("{}", event.delta);
//!     if event.done { break; }
//! }
//! ```

pub mod error;
pub mod streaming;
pub mod types;

pub use error::{OpenAIError, Result};
pub use streaming::{RunEvent, RunEventStream, MESSAGE_DELTA_EVENT};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_builder(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .post(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
    }

    fn get_builder(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Assistants v2 endpoints require the beta opt-in header.
    fn beta(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("OpenAI-Beta", "assistants=v2")
    }

    async fn read_json<R: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, what, "OpenAI API error");
            return Err(OpenAIError::Api(format!(
                "OpenAI {} error: {}",
                what, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(format!("{}: {}", what, e)))
    }

    // =========================================================================
    // Chat completions
    // =========================================================================

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get a response.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .post_builder("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let chat_response: types::ChatResponseRaw =
            Self::read_json(response, "chat completion").await?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Api("No response from OpenAI".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    // =========================================================================
    // Assistants v2
    // =========================================================================

    /// Create an assistant with a `file_search` tool bound to a vector store.
    pub async fn create_assistant(&self, request: &CreateAssistantRequest) -> Result<Assistant> {
        let response = Self::beta(self.post_builder("/assistants"))
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        let assistant: Assistant = Self::read_json(response, "assistant create").await?;

        debug!(assistant_id = %assistant.id, model = %assistant.model, "Assistant created");
        Ok(assistant)
    }

    /// Create a thread seeded with the full message history, order preserved.
    pub async fn create_thread(&self, messages: &[Message]) -> Result<Thread> {
        let body = serde_json::json!({ "messages": messages });

        let response = Self::beta(self.post_builder("/threads"))
            .json(&body)
            .send()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        Self::read_json(response, "thread create").await
    }

    /// Start a streamed run of an assistant against a thread.
    ///
    /// Returns a stream of `(event_type, delta_text)` events; callers
    /// concatenate the deltas of `thread.message.delta` events in arrival
    /// order to assemble the full answer.
    pub async fn stream_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunEventStream> {
        let body = serde_json::json!({
            "assistant_id": assistant_id,
            "stream": true,
        });

        let response = Self::beta(self.post_builder(&format!("/threads/{}/runs", thread_id)))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, thread_id, "OpenAI run request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI run API error");
            return Err(OpenAIError::Api(format!(
                "OpenAI run error: {}",
                error_text
            )));
        }

        Ok(RunEventStream::new(response.bytes_stream()))
    }

    // =========================================================================
    // Vector stores & files
    // =========================================================================

    /// Retrieve an existing vector store by id.
    pub async fn retrieve_vector_store(&self, vector_store_id: &str) -> Result<VectorStore> {
        let response = Self::beta(self.get_builder(&format!("/vector_stores/{}", vector_store_id)))
            .send()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        Self::read_json(response, "vector store retrieve").await
    }

    /// Create a new, empty vector store.
    pub async fn create_vector_store(&self, name: &str) -> Result<VectorStore> {
        let body = serde_json::json!({ "name": name });

        let response = Self::beta(self.post_builder("/vector_stores"))
            .json(&body)
            .send()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        let store: VectorStore = Self::read_json(response, "vector store create").await?;
        debug!(vector_store_id = %store.id, "Vector store created");
        Ok(store)
    }

    /// Upload a file with purpose `assistants`.
    pub async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<FileObject> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .http_client
            .post(format!("{}/files", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        Self::read_json(response, "file upload").await
    }

    /// Attach an uploaded file to a vector store for indexing.
    pub async fn attach_file_to_vector_store(
        &self,
        vector_store_id: &str,
        file_id: &str,
    ) -> Result<VectorStoreFile> {
        let body = serde_json::json!({ "file_id": file_id });

        let response = Self::beta(
            self.post_builder(&format!("/vector_stores/{}/files", vector_store_id)),
        )
        .json(&body)
        .send()
        .await
        .map_err(|e| OpenAIError::Network(e.to_string()))?;

        Self::read_json(response, "vector store file attach").await
    }
}
