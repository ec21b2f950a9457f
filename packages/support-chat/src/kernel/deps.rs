//! Chat dependencies (using traits for testability)
//!
//! The central container handed to every chat action. The LLM sits behind
//! `BaseAI` so tests can swap in `MockAI`.

use anyhow::{Context, Result};
use llm_client::LlmClient;
use resource_engine::{ResourceCatalog, ResourceRetriever};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domains::chat::{ConversationContext, Persona};
use crate::kernel::BaseAI;

/// Dependencies accessible to chat actions. Cheap to clone and share.
#[derive(Clone)]
pub struct ChatDeps {
    /// LLM backend; `None` means every reply is the persona fallback
    pub ai: Option<Arc<dyn BaseAI>>,
    pub retriever: Arc<ResourceRetriever>,
    pub default_persona: Persona,
    pub max_tokens: u32,
    pub history_turns: usize,
}

impl ChatDeps {
    pub fn new(retriever: Arc<ResourceRetriever>) -> Self {
        Self {
            ai: None,
            retriever,
            default_persona: Persona::default(),
            max_tokens: 1200,
            history_turns: 5,
        }
    }

    /// Build from configuration: load the catalog, wire up the LLM client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => ResourceCatalog::from_path(path)
                .with_context(|| format!("Failed to load resource catalog {}", path.display()))?,
            None => ResourceCatalog::seeded().context("Embedded resource catalog is invalid")?,
        };
        let retriever = ResourceRetriever::with_config(Arc::new(catalog), config.retrieval.clone());

        let ai: Option<Arc<dyn BaseAI>> = match &config.llm_api_key {
            Some(key) => {
                let mut client = LlmClient::new(config.llm_provider, key.clone());
                if let Some(model) = &config.llm_model {
                    client = client.with_model(model.clone());
                }
                info!(provider = %client.provider(), model = %client.model(), "LLM client configured");
                Some(Arc::new(client) as Arc<dyn BaseAI>)
            }
            None => {
                warn!(
                    env = config.llm_provider.api_key_env(),
                    "LLM API key not set, replies will use the fallback message"
                );
                None
            }
        };

        Ok(Self {
            ai,
            retriever: Arc::new(retriever),
            default_persona: config.persona,
            max_tokens: config.llm_max_tokens,
            history_turns: config.history_turns,
        })
    }

    /// Set the AI backend.
    pub fn with_ai(mut self, ai: Arc<dyn BaseAI>) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Set the default persona.
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.default_persona = persona;
        self
    }

    /// Set the number of remembered turns for new conversations.
    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    /// Start an empty conversation sized to `history_turns`.
    pub fn start_conversation(&self, user_id: Option<String>) -> ConversationContext {
        ConversationContext::new(user_id, self.history_turns)
    }
}
