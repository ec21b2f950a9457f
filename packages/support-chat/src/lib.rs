//! Support chat backend
//!
//! Takes a user's message plus whatever profile context they shared, pulls
//! matching local aid resources from `resource_engine`, and asks an LLM for a
//! reply in one of two personas. When no LLM is configured or the call fails,
//! the persona's canned fallback is returned instead of an error.
//!
//! Each reply also carries emotion scores for the user's message. Journal
//! entries and whole conversations can be analyzed the same way, with
//! keyword or canned fallbacks when the LLM is unavailable.
//!
//! # Example
//!
//! ```rust,ignore
//! use support_chat::{generate_reply, ChatDeps, ChatRequest, Config};
//!
//! let config = Config::from_env()?;
//! let deps = ChatDeps::from_config(&config)?;
//! let mut conversation = deps.start_conversation(Some("user-1".into()));
//!
//! let reply = generate_reply(
//!     &deps,
//!     &mut conversation,
//!     &ChatRequest::new("I need somewhere to sleep tonight").with_location("Oakland"),
//! )
//! .await?;
//! ```

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::Config;
pub use domains::chat::{
    analyze_journal_entry, generate_reply, preview_resources, score_emotional_state,
    summarize_conversation, ChatError, ChatReply, ChatRequest, ConversationContext,
    ConversationSummary, ConversationTurn, EmotionLevels, EmotionScores, JournalAnalysis, Persona,
    Sentiment, UrgencyLevel, UserContext,
};
pub use kernel::{BaseAI, ChatDeps};
