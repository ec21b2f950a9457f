//! Gemini `generateContent` wire format.

use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};
use crate::types::{CompletionRequest, Role};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content<'a>>,
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    pub text: Option<String>,
}

const DEFAULT_TEMPERATURE: f32 = 0.3;

pub(crate) fn build_request(request: &CompletionRequest) -> GenerateRequest<'_> {
    GenerateRequest {
        system_instruction: request.system.as_deref().map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        }),
        contents: request
            .messages
            .iter()
            .map(|m| Content {
                role: Some(match m.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                }),
                parts: vec![Part { text: &m.content }],
            })
            .collect(),
        generation_config: GenerationConfig {
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: request.max_tokens,
        },
    }
}

pub(crate) fn extract_text(response: GenerateResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().find_map(|p| p.text))
        .ok_or(LlmError::EmptyResponse("gemini"))
}
