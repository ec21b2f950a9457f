//! Summarize conversation action - needs, tone and next steps from recent messages

use chrono::Utc;
use llm_client::Message;
use serde::Deserialize;
use tracing::info;

use super::analyze_journal::context_line;
use super::json_reply::complete_json;
use crate::domains::chat::analysis::ConversationSummary;
use crate::domains::chat::models::UserContext;
use crate::kernel::ChatDeps;

/// Only the most recent messages go into the prompt
const SUMMARY_WINDOW: usize = 10;

#[derive(Debug, Deserialize)]
struct SummaryReply {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    user_needs: Vec<String>,
    #[serde(default)]
    emotional_tone: String,
    #[serde(default)]
    progress_indicators: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    follow_up_needed: bool,
}

fn summary_prompt(messages: &[Message], context: Option<&UserContext>) -> String {
    let recent = &messages[messages.len().saturating_sub(SUMMARY_WINDOW)..];
    let conversation = recent
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        r#"Summarize this conversation and provide insights in JSON format:

Conversation:
{conversation}

Please analyze and respond with ONLY a valid JSON object containing:
{{
    "summary": "Brief summary of the conversation",
    "user_needs": ["need1", "need2", "need3"],
    "emotional_tone": "overall emotional tone",
    "progress_indicators": ["positive sign1", "positive sign2"],
    "recommendations": ["recommendation1", "recommendation2"],
    "follow_up_needed": true/false
}}"#
    );
    prompt.push_str(&context_line(context));
    prompt
}

/// Summarize a conversation from its messages, oldest first.
///
/// An empty conversation never reaches the LLM. Without a usable LLM reply
/// [`ConversationSummary::fallback`] is returned; this never fails.
pub async fn summarize_conversation(
    deps: &ChatDeps,
    messages: &[Message],
    context: Option<&UserContext>,
) -> ConversationSummary {
    if messages.is_empty() {
        return ConversationSummary::fallback(0);
    }

    let prompt = summary_prompt(messages, context);
    match complete_json::<SummaryReply>(deps, "conversation_summary", &prompt).await {
        Some(reply) => {
            info!(
                message_count = messages.len(),
                follow_up = reply.follow_up_needed,
                "Conversation summarized"
            );
            ConversationSummary {
                summary: reply.summary,
                user_needs: reply.user_needs,
                emotional_tone: reply.emotional_tone,
                progress_indicators: reply.progress_indicators,
                recommendations: reply.recommendations,
                follow_up_needed: reply.follow_up_needed,
                message_count: messages.len(),
                generated_at: Utc::now(),
                fallback: false,
            }
        }
        None => ConversationSummary::fallback(messages.len()),
    }
}
