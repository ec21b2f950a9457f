//! Pull a JSON object out of an LLM reply.

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::kernel::ChatDeps;

/// Extract JSON from a response that may have markdown code blocks or extra text
pub fn extract_json_from_response(response: &str) -> &str {
    let trimmed = response.trim();

    // ```json ... ``` or ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let body = &trimmed[start + 3..];
        let body = body.strip_prefix("json").unwrap_or(body);
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Parse an LLM reply as `T`, tolerating fences and surrounding prose.
pub fn parse_json_reply<T: DeserializeOwned>(response: &str) -> serde_json::Result<T> {
    serde_json::from_str(extract_json_from_response(response))
}

/// Send a single analysis prompt and parse the reply as `T`.
///
/// `None` when no LLM is configured, the call fails, or the reply does not
/// parse. Callers substitute their fallback.
pub async fn complete_json<T: DeserializeOwned>(
    deps: &ChatDeps,
    task: &'static str,
    prompt: &str,
) -> Option<T> {
    let Some(ai) = &deps.ai else {
        debug!(task, "No LLM configured, using fallback analysis");
        return None;
    };

    let response = match ai.complete_prompt(None, prompt).await {
        Ok(response) => response,
        Err(e) => {
            error!(task, error = %e, "LLM analysis request failed");
            return None;
        }
    };

    match parse_json_reply(&response) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(task, error = %e, "LLM analysis reply was not the expected JSON");
            None
        }
    }
}
