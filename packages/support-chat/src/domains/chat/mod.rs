//! Chat domain - one user message in, one persona reply out, plus emotion,
//! journal and conversation analysis.

pub mod actions;
pub mod analysis;
pub mod error;
pub mod models;
pub mod persona;

pub use actions::{
    analyze_journal_entry, generate_reply, preview_resources, score_emotional_state,
    summarize_conversation,
};
pub use analysis::{
    ConversationSummary, EmotionLevels, EmotionScores, JournalAnalysis, Sentiment, UrgencyLevel,
};
pub use error::ChatError;
pub use models::*;
pub use persona::Persona;
