//! Emotion, journal and conversation analysis results.
//!
//! Every result carries a `fallback` flag. Fallback values are produced
//! without the LLM and are safe to show or store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Emotion scores
// =============================================================================

fn neutral_level() -> f64 {
    0.5
}

/// Five emotion dimensions, each on a 0..=1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionLevels {
    #[serde(default = "neutral_level")]
    pub distress: f64,
    #[serde(default = "neutral_level")]
    pub hope: f64,
    #[serde(default = "neutral_level")]
    pub motivation: f64,
    #[serde(default = "neutral_level")]
    pub anxiety: f64,
    #[serde(default = "neutral_level")]
    pub positivity: f64,
}

impl EmotionLevels {
    /// Every dimension at 0.5
    pub fn neutral() -> Self {
        Self {
            distress: 0.5,
            hope: 0.5,
            motivation: 0.5,
            anxiety: 0.5,
            positivity: 0.5,
        }
    }

    /// Clamp every dimension into 0..=1. NaN becomes 0.5.
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) };
        Self {
            distress: clamp(self.distress),
            hope: clamp(self.hope),
            motivation: clamp(self.motivation),
            anxiety: clamp(self.anxiety),
            positivity: clamp(self.positivity),
        }
    }
}

impl Default for EmotionLevels {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Emotional read of a single message, attached to each chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    #[serde(flatten)]
    pub levels: EmotionLevels,
    #[serde(default)]
    pub overall_sentiment: Sentiment,
    #[serde(default)]
    pub fallback: bool,
}

impl EmotionScores {
    /// Neutral scores used when the LLM is missing, fails, or replies with
    /// something that is not the expected JSON.
    pub fn fallback() -> Self {
        Self {
            levels: EmotionLevels::neutral(),
            overall_sentiment: Sentiment::Neutral,
            fallback: true,
        }
    }
}

// =============================================================================
// Journal analysis
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalAnalysis {
    pub emotion_scores: EmotionLevels,
    pub key_themes: Vec<String>,
    pub insights: String,
    pub suggestions: String,
    pub urgency_level: UrgencyLevel,
    /// Length of the analyzed entry in characters
    pub original_text_length: usize,
    pub analyzed_at: DateTime<Utc>,
    pub fallback: bool,
}

const DISTRESS_WORDS: &[&str] = &[
    "sad",
    "depressed",
    "anxious",
    "worried",
    "scared",
    "hopeless",
    "difficult",
    "hard",
    "struggle",
];
const HOPE_WORDS: &[&str] = &[
    "better", "hope", "improve", "positive", "good", "happy", "grateful", "thankful",
];

impl JournalAnalysis {
    /// Keyword-based analysis used without the LLM.
    ///
    /// Distress and hope are the share of their word lists found anywhere in
    /// the entry; anxiety and positivity are derived from them.
    pub fn fallback(journal_text: &str) -> Self {
        let text = journal_text.to_lowercase();
        let share = |words: &[&str]| {
            words.iter().filter(|w| text.contains(*w)).count() as f64 / words.len() as f64
        };
        let distress = share(DISTRESS_WORDS);
        let hope = share(HOPE_WORDS);

        Self {
            emotion_scores: EmotionLevels {
                distress: distress.min(1.0),
                hope: hope.min(1.0),
                motivation: 0.5,
                anxiety: (distress * 0.8).min(1.0),
                positivity: (hope * 1.2).min(1.0),
            },
            key_themes: vec!["personal reflection".to_string()],
            insights: "Journal entry reflects personal thoughts and experiences".to_string(),
            suggestions: "Continue journaling to track your emotional journey".to_string(),
            urgency_level: UrgencyLevel::Low,
            original_text_length: journal_text.chars().count(),
            analyzed_at: Utc::now(),
            fallback: true,
        }
    }
}

// =============================================================================
// Conversation summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub summary: String,
    pub user_needs: Vec<String>,
    pub emotional_tone: String,
    pub progress_indicators: Vec<String>,
    pub recommendations: Vec<String>,
    pub follow_up_needed: bool,
    /// Number of messages the caller handed in (not just the ones sent)
    pub message_count: usize,
    pub generated_at: DateTime<Utc>,
    pub fallback: bool,
}

impl ConversationSummary {
    pub fn fallback(message_count: usize) -> Self {
        Self {
            summary: format!(
                "Conversation with {message_count} messages about support and resources"
            ),
            user_needs: vec!["support".to_string(), "resources".to_string()],
            emotional_tone: "seeking assistance".to_string(),
            progress_indicators: vec!["reaching out for help".to_string()],
            recommendations: vec![
                "continue conversation".to_string(),
                "follow up on resources".to_string(),
            ],
            follow_up_needed: true,
            message_count,
            generated_at: Utc::now(),
            fallback: true,
        }
    }
}
