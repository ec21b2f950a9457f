//! Chat request/reply envelopes and the caller-owned conversation state.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use llm_client::Message;
use resource_engine::{NeedCategory, RetrievalResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::EmotionScores;
use super::persona::Persona;

// =============================================================================
// Request
// =============================================================================

/// Optional profile details the user has shared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    /// Free-text needs, e.g. "food and housing"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<String>,
}

impl UserContext {
    /// Location with surrounding whitespace removed, if anything is left.
    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    pub fn situation(&self) -> Option<&str> {
        non_blank(self.situation.as_deref())
    }

    pub fn needs(&self) -> Option<&str> {
        non_blank(self.needs.as_deref())
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && self.location().is_none()
            && self.situation().is_none()
            && self.needs().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Incoming chat message: `{message, context: {location, situation, needs}, user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: UserContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Overrides the configured persona for this message
    #[serde(default, alias = "prompt_type", skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: UserContext::default(),
            user_id: None,
            persona: None,
        }
    }

    /// Set the user's location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.context.location = Some(location.into());
        self
    }

    /// Set the user's situation.
    pub fn with_situation(mut self, situation: impl Into<String>) -> Self {
        self.context.situation = Some(situation.into());
        self
    }

    /// Set the user's stated needs.
    pub fn with_needs(mut self, needs: impl Into<String>) -> Self {
        self.context.needs = Some(needs.into());
        self
    }

    /// Set the user's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.context.name = Some(name.into());
        self
    }

    /// Set the user id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the persona.
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }
}

// =============================================================================
// Reply
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub persona: Persona,
    /// Need categories inferred from the message and context (empty for greetings)
    pub needs: Vec<NeedCategory>,
    /// Present when the user context carried a location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<RetrievalResult>,
    /// True when the canned persona fallback replaced an LLM answer
    pub used_fallback: bool,
    /// Emotion scores for the user's message (absent for greetings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_analysis: Option<EmotionScores>,
    pub generated_at: DateTime<Utc>,
}

// =============================================================================
// Conversation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user: String,
    pub assistant: String,
    pub at: DateTime<Utc>,
}

/// Recent turns for one user, owned by the caller and passed into each reply.
///
/// Holds at most `max_turns` turns; recording past the limit drops the oldest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub id: Uuid,
    pub user_id: Option<String>,
    max_turns: usize,
    turns: VecDeque<ConversationTurn>,
}

impl ConversationContext {
    pub fn new(user_id: Option<String>, max_turns: usize) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            max_turns,
            turns: VecDeque::with_capacity(max_turns),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn turns(&self) -> impl ExactSizeIterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a completed exchange.
    pub fn record(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        if self.max_turns == 0 {
            return;
        }
        while self.turns.len() >= self.max_turns {
            self.turns.pop_front();
        }
        self.turns.push_back(ConversationTurn {
            user: user.into(),
            assistant: assistant.into(),
            at: Utc::now(),
        });
    }

    /// Recent turns as alternating user/assistant messages, oldest first.
    pub fn history_messages(&self) -> Vec<Message> {
        self.turns
            .iter()
            .flat_map(|turn| {
                [
                    Message::user(turn.user.clone()),
                    Message::assistant(turn.assistant.clone()),
                ]
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_client::Role;

    #[test]
    fn test_request_from_json_body() {
        let request: ChatRequest = serde_json::from_str(
            r#"{
                "message": "I need a place to stay",
                "context": {"location": "Oakland", "situation": "family with kids", "needs": "housing"},
                "user_id": "u-42",
                "prompt_type": "direct_assistant"
            }"#,
        )
        .unwrap();

        assert_eq!(request.context.location(), Some("Oakland"));
        assert_eq!(request.context.name(), None);
        assert_eq!(request.user_id.as_deref(), Some("u-42"));
        assert_eq!(request.persona, Some(Persona::DirectAssistant));
    }

    #[test]
    fn test_request_without_context() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.context.is_empty());
        assert!(request.persona.is_none());
    }

    #[test]
    fn test_blank_context_fields_are_absent() {
        let request = ChatRequest::new("help").with_location("   ").with_situation("");
        assert_eq!(request.context.location(), None);
        assert_eq!(request.context.situation(), None);
        assert!(request.context.is_empty());
    }

    #[test]
    fn test_conversation_drops_oldest_turn() {
        let mut conversation = ConversationContext::new(Some("u-1".into()), 2);
        conversation.record("one", "1");
        conversation.record("two", "2");
        conversation.record("three", "3");

        let users: Vec<&str> = conversation.turns().map(|t| t.user.as_str()).collect();
        assert_eq!(users, vec!["two", "three"]);
    }

    #[test]
    fn test_zero_turn_conversation_keeps_nothing() {
        let mut conversation = ConversationContext::new(None, 0);
        conversation.record("hello", "hi");
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_history_messages_alternate() {
        let mut conversation = ConversationContext::new(None, 5);
        conversation.record("I'm hungry", "Here are some food banks");

        let messages = conversation.history_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Here are some food banks");
    }
}
