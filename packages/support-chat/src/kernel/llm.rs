// AI implementation backed by the provider-agnostic LLM client
//
// This is the infrastructure implementation of BaseAI.
// Prompt content lives in the chat domain.

use anyhow::Result;
use async_trait::async_trait;
use llm_client::{CompletionRequest, LlmClient};

use super::BaseAI;

#[async_trait]
impl BaseAI for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        Ok(LlmClient::complete(self, request).await?)
    }
}
