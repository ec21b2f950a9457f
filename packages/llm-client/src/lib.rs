//! Provider-agnostic LLM completion client
//!
//! A thin REST client that turns a [`CompletionRequest`] (system prompt plus
//! conversation messages) into a single text reply from Anthropic, Gemini or
//! OpenAI. No domain logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{CompletionRequest, LlmClient, Message, Provider};
//!
//! let client = LlmClient::from_env(Provider::Anthropic)?;
//!
//! let reply = client
//!     .complete(
//!         &CompletionRequest::new()
//!             .system("You are a compassionate assistant.")
//!             .message(Message::user("Where can I get a meal tonight?"))
//!             .max_tokens(1000),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod provider;
pub mod types;

mod anthropic;
mod gemini;
mod openai;

pub use error::{LlmError, Result};
pub use provider::Provider;
pub use types::*;

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// LLM completion client bound to one provider and model.
#[derive(Clone)]
pub struct LlmClient {
    http_client: Client,
    provider: Provider,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    /// Create a client for `provider` using its default model and base URL.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            provider,
            api_key: api_key.into(),
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from the provider's API key environment variable.
    pub fn from_env(provider: Provider) -> Result<Self> {
        let var = provider.api_key_env();
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::Config(format!("{var} not set")))?;
        Ok(Self::new(provider, api_key))
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, gateways, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Text completion.
    ///
    /// Sends the request in the provider's wire format and returns the first
    /// text block of the reply.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let start = Instant::now();

        let text = match self.provider {
            Provider::Anthropic => {
                let body = anthropic::build_request(&self.model, request);
                let builder = self
                    .http_client
                    .post(format!("{}/messages", self.base_url))
                    .header("x-api-key", &self.api_key)
                    .header("anthropic-version", anthropic::ANTHROPIC_VERSION)
                    .json(&body);
                anthropic::extract_text(self.send(builder).await?)?
            }
            Provider::Gemini => {
                let body = gemini::build_request(request);
                let builder = self
                    .http_client
                    .post(format!(
                        "{}/models/{}:generateContent",
                        self.base_url, self.model
                    ))
                    .query(&[("key", self.api_key.as_str())])
                    .json(&body);
                gemini::extract_text(self.send(builder).await?)?
            }
            Provider::OpenAi => {
                let body = openai::build_request(&self.model, request);
                let builder = self
                    .http_client
                    .post(format!("{}/chat/completions", self.base_url))
                    .bearer_auth(&self.api_key)
                    .json(&body);
                openai::extract_text(self.send(builder).await?)?
            }
        };

        debug!(
            provider = %self.provider,
            model = %self.model,
            messages = request.messages.len(),
            duration_ms = start.elapsed().as_millis(),
            "LLM completion"
        );

        Ok(text)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.timeout(self.timeout).send().await.map_err(|e| {
            warn!(provider = %self.provider, error = %e, "LLM request failed");
            LlmError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(provider = %self.provider, status = %status, error = %body, "LLM API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_provider() {
        let client = LlmClient::new(Provider::Gemini, "key");
        assert_eq!(client.provider(), Provider::Gemini);
        assert_eq!(client.model(), "gemini-1.5-flash-latest");
        assert_eq!(
            client.base_url(),
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let client = LlmClient::new(Provider::OpenAi, "key")
            .with_model("gpt-4o-mini")
            .with_base_url("http://localhost:8080/v1/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = LlmClient::new(Provider::Anthropic, "sk-secret");
        assert!(!format!("{client:?}").contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = LlmClient::new(Provider::Anthropic, "key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let err = client
            .complete(&CompletionRequest::new().message(Message::user("hi")))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    #[ignore = "Requires ANTHROPIC_API_KEY"]
    async fn test_live_anthropic_completion() {
        let client = LlmClient::from_env(Provider::Anthropic).unwrap();
        let reply = client
            .complete(
                &CompletionRequest::new()
                    .system("Answer in one short sentence.")
                    .message(Message::user("What number do I call for local social services in the US?"))
                    .max_tokens(100),
            )
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
