//! Analyze journal action - emotion levels, themes and suggestions for one entry

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::json_reply::complete_json;
use crate::domains::chat::analysis::{EmotionLevels, JournalAnalysis, UrgencyLevel};
use crate::domains::chat::models::UserContext;
use crate::kernel::ChatDeps;

/// Fields the LLM is asked for. Anything missing takes its default.
#[derive(Debug, Deserialize)]
struct JournalReply {
    #[serde(default)]
    emotion_scores: EmotionLevels,
    #[serde(default)]
    key_themes: Vec<String>,
    #[serde(default)]
    insights: String,
    #[serde(default)]
    suggestions: String,
    #[serde(default)]
    urgency_level: UrgencyLevel,
}

fn journal_analysis_prompt(journal_text: &str, context: Option<&UserContext>) -> String {
    let mut prompt = format!(
        r#"Analyze this journal entry and provide insights in JSON format:

Journal Entry: "{journal_text}"

Please analyze and respond with ONLY a valid JSON object containing:
{{
    "emotion_scores": {{
        "distress": 0.0-1.0,
        "hope": 0.0-1.0,
        "motivation": 0.0-1.0,
        "anxiety": 0.0-1.0,
        "positivity": 0.0-1.0
    }},
    "key_themes": ["theme1", "theme2", "theme3"],
    "insights": "Brief insight about the person's emotional state",
    "suggestions": "Supportive suggestions for improvement",
    "urgency_level": "low|medium|high"
}}"#
    );
    prompt.push_str(&context_line(context));
    prompt
}

/// "User Context: <situation> in <location>" when either is known.
pub(super) fn context_line(context: Option<&UserContext>) -> String {
    let Some(context) = context else {
        return String::new();
    };
    if context.situation().is_none() && context.location().is_none() {
        return String::new();
    }
    format!(
        "\n\nUser Context: {} in {}",
        context.situation().unwrap_or_default(),
        context.location().unwrap_or_default()
    )
}

/// Analyze a journal entry.
///
/// A blank entry never reaches the LLM. Without a usable LLM reply the
/// keyword-based [`JournalAnalysis::fallback`] is returned; this never fails.
pub async fn analyze_journal_entry(
    deps: &ChatDeps,
    journal_text: &str,
    context: Option<&UserContext>,
) -> JournalAnalysis {
    if journal_text.trim().is_empty() {
        return JournalAnalysis::fallback(journal_text);
    }

    let prompt = journal_analysis_prompt(journal_text, context);
    match complete_json::<JournalReply>(deps, "journal_analysis", &prompt).await {
        Some(reply) => {
            info!(
                urgency = ?reply.urgency_level,
                themes = reply.key_themes.len(),
                "Journal entry analyzed"
            );
            JournalAnalysis {
                emotion_scores: reply.emotion_scores.clamped(),
                key_themes: reply.key_themes,
                insights: reply.insights,
                suggestions: reply.suggestions,
                urgency_level: reply.urgency_level,
                original_text_length: journal_text.chars().count(),
                analyzed_at: Utc::now(),
                fallback: false,
            }
        }
        None => JournalAnalysis::fallback(journal_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockAI, TestDependencies};

    const ENTRY: &str = "Really anxious today. Still no place to stay but the food bank helped.";

    #[tokio::test]
    async fn test_analysis_from_llm_reply() {
        let ai = MockAI::new().with_response(
            r#"{
                "emotion_scores": {"distress": 0.8, "hope": 0.4, "motivation": 0.5, "anxiety": 1.3, "positivity": 0.3},
                "key_themes": ["housing", "anxiety"],
                "insights": "Worried about housing but finding some support.",
                "suggestions": "Call 211 for shelter openings.",
                "urgency_level": "high"
            }"#,
        );
        let deps = TestDependencies::new().mock_ai(ai.clone()).into_deps();
        let context = UserContext {
            location: Some("Oakland".into()),
            situation: Some("staying in car".into()),
            ..Default::default()
        };

        let analysis = analyze_journal_entry(&deps, ENTRY, Some(&context)).await;

        assert!(!analysis.fallback);
        assert_eq!(analysis.urgency_level, UrgencyLevel::High);
        assert_eq!(analysis.key_themes, vec!["housing", "anxiety"]);
        assert_eq!(analysis.emotion_scores.anxiety, 1.0);
        assert_eq!(analysis.original_text_length, ENTRY.chars().count());
        assert!(ai.was_called_with(&format!("Journal Entry: \"{ENTRY}\"")));
        assert!(ai.was_called_with("User Context: staying in car in Oakland"));
    }

    #[tokio::test]
    async fn test_fallback_on_unparseable_reply() {
        let ai = MockAI::new().with_response("Sounds like a hard day.");
        let deps = TestDependencies::new().mock_ai(ai).into_deps();

        let analysis = analyze_journal_entry(&deps, ENTRY, None).await;
        assert!(analysis.fallback);
        let expected = JournalAnalysis {
            analyzed_at: analysis.analyzed_at,
            ..JournalAnalysis::fallback(ENTRY)
        };
        assert_eq!(analysis, expected);
    }

    #[tokio::test]
    async fn test_fallback_on_llm_failure() {
        let ai = MockAI::new().with_failure("timeout");
        let deps = TestDependencies::new().mock_ai(ai.clone()).into_deps();

        let analysis = analyze_journal_entry(&deps, ENTRY, None).await;
        assert!(analysis.fallback);
        // "anxious" is one of nine distress words
        assert!((analysis.emotion_scores.distress - 1.0 / 9.0).abs() < 1e-9);
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_entry_skips_llm() {
        let ai = MockAI::new();
        let deps = TestDependencies::new().mock_ai(ai.clone()).into_deps();

        assert!(analyze_journal_entry(&deps, "  ", None).await.fallback);
        assert_eq!(ai.call_count(), 0);
    }

    #[test]
    fn test_context_line() {
        assert_eq!(context_line(None), "");
        assert_eq!(context_line(Some(&UserContext::default())), "");
        let context = UserContext {
            location: Some("SF".into()),
            ..Default::default()
        };
        assert_eq!(context_line(Some(&context)), "\n\nUser Context:  in SF");
    }
}
