//! Provider-neutral request types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Messages
// =============================================================================

/// Conversation role. The system prompt is carried separately on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// =============================================================================
// Completion Request
// =============================================================================

/// Text completion request, translated to each provider's wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System prompt (persona, user context, retrieved resources)
    pub system: Option<String>,

    /// Conversation messages, oldest first
    pub messages: Vec<Message>,

    /// Maximum tokens in the reply
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self {
            system: None,
            messages: Vec::new(),
            max_tokens: 1000,
            temperature: None,
        }
    }
}

impl CompletionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system prompt.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Append several messages.
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new()
            .system("Be kind")
            .message(Message::user("hi"))
            .messages(vec![Message::assistant("hello"), Message::user("help")])
            .max_tokens(1200)
            .temperature(0.3);

        assert_eq!(request.system.as_deref(), Some("Be kind"));
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[1].role, Role::Assistant);
        assert_eq!(request.max_tokens, 1200);
        assert_eq!(request.temperature, Some(0.3));
    }

    #[test]
    fn test_role_name_matches_serde() {
        assert_eq!(Role::Assistant.as_str(), "assistant");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), Role::User.as_str());
    }
}
