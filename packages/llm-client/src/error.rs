//! Error types for the LLM client.

use thiserror::Error;

/// Result type for LLM client operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration error (missing API key, unknown provider)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider answered without any text content
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),
}

impl LlmError {
    /// True for failures worth retrying (network, 429, 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Network(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
