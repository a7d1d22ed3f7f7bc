//! Travvy, the interactive travel assistant.
//!
//! Thin chat driver around the answer pipeline: reads questions from
//! stdin, prints answers, keeps one session for the process lifetime.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use navigator::{
    AssistantAnswerer, AssistantHandle, AugmentationSelector, ChatCompleter, Config,
    FallbackResolver, IndexHandle, Navigator, Session,
};
use openai_client::{CreateAssistantRequest, OpenAIClient};
use travel_search::{BrowserlessRenderer, PageRenderer};

const ASSISTANT_NAME: &str = "Travvy Navigator Assistant";

const ASSISTANT_INSTRUCTIONS: &str = "You are Travvy Navigator Assistant, a highly \
    knowledgeable travel expert. Use the provided internal travel documents to answer \
    queries regarding itinerary planning, booking processes, and internal protocols \
    with precision. If insufficient details are present, respond with 'answer not \
    available in context'.";

const VECTOR_STORE_NAME: &str = "Travvy Travel Documents";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let client = OpenAIClient::new(config.openai_api_key.clone());

    // Reuse the configured corpus, or start an empty one.
    let vector_store = match &config.vector_store_id {
        Some(id) => client
            .retrieve_vector_store(id)
            .await
            .with_context(|| format!("retrieving vector store {}", id))?,
        None => client
            .create_vector_store(VECTOR_STORE_NAME)
            .await
            .context("creating vector store")?,
    };
    info!(vector_store_id = %vector_store.id, "Travel document corpus ready");

    let assistant = client
        .create_assistant(&CreateAssistantRequest {
            name: ASSISTANT_NAME.to_string(),
            instructions: ASSISTANT_INSTRUCTIONS.to_string(),
            model: config.model.clone(),
            vector_store_id: vector_store.id.clone(),
        })
        .await
        .context("creating assistant")?;
    info!(assistant_id = %assistant.id, "Assistant ready");

    let renderer: Option<Arc<dyn PageRenderer>> = config
        .browserless_api_key
        .as_deref()
        .map(|key| Arc::new(BrowserlessRenderer::new(key)) as Arc<dyn PageRenderer>);
    if renderer.is_none() {
        info!("No render service configured; hotel/flight search routes disabled");
    }

    let answerer = AssistantAnswerer::new(
        client.clone(),
        AssistantHandle::new(assistant.id.clone()),
    );
    let completer = ChatCompleter::new(client, config.model.clone());
    let fallback = FallbackResolver::new(Arc::new(completer), config.fallback_strategy);
    let augmenter = AugmentationSelector::standard(renderer);

    let pipeline = Navigator::new(Arc::new(answerer), fallback, augmenter);
    let mut session = Session::new(
        AssistantHandle::new(assistant.id),
        IndexHandle::new(vector_store.id),
    );

    println!("Travvy, your travel assistant. Ask about your trip, itinerary");
    println!("planning, or internal processes. Type 'exit' to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("\nyou> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();

        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match pipeline.answer_turn(&mut session, question).await {
            Ok(result) => {
                println!("\ntravvy> {}", result.answer);
            }
            Err(e) => {
                eprintln!("\nerror: {} (please resubmit your question)", e);
            }
        }
    }

    Ok(())
}
