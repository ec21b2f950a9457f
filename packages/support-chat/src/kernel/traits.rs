// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only. What to prompt for lives in the
// chat domain; these only move a finished request to a model and back.
//
// Naming convention: Base* for trait names (e.g., BaseAI)

use anyhow::Result;
use async_trait::async_trait;
use llm_client::{CompletionRequest, Message};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a system prompt + conversation (returns raw text response)
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Complete a single user prompt with an optional system prompt
    async fn complete_prompt(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let mut request = CompletionRequest::new().message(Message::user(prompt));
        request.system = system.map(str::to_string);
        self.complete(&request).await
    }
}
