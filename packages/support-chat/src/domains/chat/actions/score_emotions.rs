//! Score emotions action - 0..1 emotion levels for one piece of text

use tracing::info;

use super::json_reply::complete_json;
use crate::domains::chat::analysis::EmotionScores;
use crate::kernel::ChatDeps;

fn emotion_scoring_prompt(text: &str) -> String {
    format!(
        r#"Score the emotional content of this text on a 0-1 scale and respond with ONLY a valid JSON object:

Text: "{text}"

Respond with:
{{
    "distress": 0.0-1.0,
    "hope": 0.0-1.0,
    "motivation": 0.0-1.0,
    "anxiety": 0.0-1.0,
    "positivity": 0.0-1.0,
    "overall_sentiment": "positive|neutral|negative"
}}"#
    )
}

/// Score the emotional state expressed in `text`.
///
/// Levels from the LLM are clamped to 0..=1. Without a usable LLM reply the
/// neutral [`EmotionScores::fallback`] is returned; this never fails.
pub async fn score_emotional_state(deps: &ChatDeps, text: &str) -> EmotionScores {
    let prompt = emotion_scoring_prompt(text);
    match complete_json::<EmotionScores>(deps, "emotion_scores", &prompt).await {
        Some(scores) => {
            let scores = EmotionScores {
                levels: scores.levels.clamped(),
                overall_sentiment: scores.overall_sentiment,
                fallback: false,
            };
            info!(
                sentiment = ?scores.overall_sentiment,
                distress = scores.levels.distress,
                "Emotion scores generated"
            );
            scores
        }
        None => EmotionScores::fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::chat::analysis::Sentiment;
    use crate::kernel::{MockAI, TestDependencies};

    #[tokio::test]
    async fn test_scores_parsed_and_clamped() {
        let ai = MockAI::new().with_response(
            "```json\n{\"distress\": 0.9, \"hope\": 1.4, \"motivation\": 0.3, \
             \"anxiety\": -1, \"positivity\": 0.1, \"overall_sentiment\": \"negative\"}\n```",
        );
        let deps = TestDependencies::new().mock_ai(ai.clone()).into_deps();

        let scores = score_emotional_state(&deps, "I have nowhere to sleep tonight").await;

        assert!(!scores.fallback);
        assert_eq!(scores.overall_sentiment, Sentiment::Negative);
        assert_eq!(scores.levels.distress, 0.9);
        assert_eq!(scores.levels.hope, 1.0);
        assert_eq!(scores.levels.anxiety, 0.0);

        let sent = ai.last_request().unwrap();
        assert!(sent.system.is_none());
        assert!(ai.was_called_with("Text: \"I have nowhere to sleep tonight\""));
    }

    #[tokio::test]
    async fn test_missing_levels_default_to_neutral() {
        let ai = MockAI::new().with_response("{\"hope\": 0.8, \"overall_sentiment\": \"positive\"}");
        let deps = TestDependencies::new().mock_ai(ai).into_deps();

        let scores = score_emotional_state(&deps, "Found a bed for tonight").await;
        assert!(!scores.fallback);
        assert_eq!(scores.levels.hope, 0.8);
        assert_eq!(scores.levels.distress, 0.5);
    }

    #[tokio::test]
    async fn test_fallback_without_ai() {
        let deps = TestDependencies::new().into_deps();
        assert_eq!(score_emotional_state(&deps, "hello").await, EmotionScores::fallback());
    }

    #[tokio::test]
    async fn test_fallback_on_failure_or_bad_json() {
        let ai = MockAI::new()
            .with_failure("API error (500): internal")
            .with_response("I think they sound worried.");
        let deps = TestDependencies::new().mock_ai(ai.clone()).into_deps();

        assert!(score_emotional_state(&deps, "first").await.fallback);
        assert!(score_emotional_state(&deps, "second").await.fallback);
        assert_eq!(ai.call_count(), 2);
    }
}
