use thiserror::Error;

/// Errors surfaced to callers of the chat flow.
///
/// LLM failures are not here: they degrade to the persona's fallback reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// Message was empty or whitespace only
    #[error("Message is required")]
    EmptyMessage,

    /// Persona name did not match any known persona
    #[error("Unknown persona: {0} (expected empathetic_coach or direct_assistant)")]
    UnknownPersona(String),
}
