use anyhow::{Context, Result};
use dotenvy::dotenv;
use llm_client::Provider;
use resource_engine::RetrievalConfig;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domains::chat::Persona;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_provider: Provider,
    /// Overrides the provider's default model
    pub llm_model: Option<String>,
    /// Without a key every reply is the persona fallback
    pub llm_api_key: Option<String>,
    pub llm_max_tokens: u32,
    pub persona: Persona,
    pub history_turns: usize,
    /// Replaces the embedded seed catalog
    pub catalog_path: Option<PathBuf>,
    pub retrieval: RetrievalConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider: Provider = get("LLM_PROVIDER")
            .unwrap_or_else(|| "anthropic".to_string())
            .parse()
            .context("LLM_PROVIDER must be one of anthropic, gemini, openai")?;

        let persona: Persona = get("CHAT_PERSONA")
            .unwrap_or_else(|| Persona::default().name().to_string())
            .parse()
            .context("CHAT_PERSONA must be empathetic_coach or direct_assistant")?;

        let mut retrieval = RetrievalConfig::default();
        if let Some(cap) = parse_var(&get, "RANKING_DISTANCE_CAP")? {
            retrieval.ranking.distance_cap = cap;
        }
        if let Some(bonus) = parse_var(&get, "RANKING_FAMILY_BONUS")? {
            retrieval.ranking.family_bonus = bonus;
        }
        if let Some(bonus) = parse_var(&get, "RANKING_EMERGENCY_BONUS")? {
            retrieval.ranking.emergency_bonus = bonus;
        }
        if let Some(bonus) = parse_var(&get, "RANKING_OPEN_REQUIREMENTS_BONUS")? {
            retrieval.ranking.open_requirements_bonus = bonus;
        }
        if let Some(max) = parse_var(&get, "RETRIEVAL_MAX_PER_CATEGORY")? {
            retrieval.max_per_category = max;
        }
        anyhow::ensure!(
            retrieval.ranking.distance_cap > 0.0,
            "RANKING_DISTANCE_CAP must be greater than zero"
        );
        anyhow::ensure!(
            retrieval.max_per_category > 0,
            "RETRIEVAL_MAX_PER_CATEGORY must be greater than zero"
        );

        Ok(Self {
            llm_provider,
            llm_model: get("LLM_MODEL"),
            llm_api_key: get(llm_provider.api_key_env()),
            llm_max_tokens: parse_var(&get, "LLM_MAX_TOKENS")?.unwrap_or(1200),
            persona,
            history_turns: parse_var(&get, "CHAT_HISTORY_TURNS")?.unwrap_or(5),
            catalog_path: get("RESOURCE_CATALOG_PATH").map(PathBuf::from),
            retrieval,
        })
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} must be a valid number"))
        })
        .transpose()
}
