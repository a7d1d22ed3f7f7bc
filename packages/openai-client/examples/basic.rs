//! Basic OpenAI client usage example

use futures::StreamExt;
use openai_client::{ChatRequest, CreateAssistantRequest, Message, OpenAIClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = OpenAIClient::from_env()?;

    // Simple chat completion
    println!("=== Chat Completion ===");
    let response = client
        .chat_completion(
            ChatRequest::new("gpt-4o")
                .message(Message::system("You are a helpful assistant."))
                .message(Message::user("What is Rust in one sentence?"))
                .temperature(0.7)
                .max_tokens(100),
        )
        .await?;

    println!("Response: {}", response.content);

    // Streamed assistant run over a document corpus
    println!("\n=== Streamed Assistant Run ===");
    let store = client.create_vector_store("example-docs").await?;
    let assistant = client
        .create_assistant(&CreateAssistantRequest {
            name: "Example Assistant".into(),
            instructions: "Answer from the attached documents.".into(),
            model: "gpt-4o".into(),
            vector_store_id: store.id,
        })
        .await?;

    let thread = client
        .create_thread(&[Message::user("What do the documents say?")])
        .await?;

    let mut stream = client.stream_run(&thread.id, &assistant.id).await?;
    while let Some(event) = stream.next().await {
        let event = event?;
        print!("{}", event.delta);
        if event.done {
            break;
        }
    }
    println!();

    Ok(())
}
