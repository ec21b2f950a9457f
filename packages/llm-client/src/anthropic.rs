//! Anthropic Messages API wire format.

use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};
use crate::types::{CompletionRequest, Role};

pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    pub messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

pub(crate) fn build_request<'a>(model: &'a str, request: &'a CompletionRequest) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens: request.max_tokens,
        system: request.system.as_deref(),
        messages: request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role,
                content: &m.content,
            })
            .collect(),
        temperature: request.temperature,
    }
}

pub(crate) fn extract_text(response: MessagesResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .ok_or(LlmError::EmptyResponse("anthropic"))
}
