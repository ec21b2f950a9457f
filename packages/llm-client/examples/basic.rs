//! Basic LLM client usage example
//!
//! Run with `LLM_PROVIDER=gemini GEMINI_API_KEY=... cargo run -p llm-client --example basic`.

use llm_client::{CompletionRequest, LlmClient, Message, Provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let provider: Provider = std::env::var("LLM_PROVIDER")
        .unwrap_or_else(|_| "anthropic".to_string())
        .parse()?;

    // Initialize from environment
    let client = LlmClient::from_env(provider)?;

    println!("=== {} ({}) ===", client.provider(), client.model());
    let reply = client
        .complete(
            &CompletionRequest::new()
                .system("You are a calm, practical assistant for people looking for local support services.")
                .message(Message::user("I just lost my job. Where do I start?"))
                .temperature(0.3)
                .max_tokens(300),
        )
        .await?;

    println!("Response: {reply}");

    Ok(())
}
