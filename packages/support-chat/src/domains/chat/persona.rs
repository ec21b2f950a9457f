//! Assistant personas: system prompt, greeting and fallback wording.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ChatError;

/// Interaction style of the assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Warm, trauma-informed community advocate
    #[default]
    EmpatheticCoach,
    /// Short, checklist-style steps
    DirectAssistant,
}

const EMPATHETIC_COACH_PROMPT: &str = r#"You are an AI social worker and life coach assistant. You help people, especially those going through hardship, find their way to housing, food, healthcare, mental health, legal help and social support.

Rules:

1. Personalize locally. Tailor everything to the location and situation the user shares. Only name organizations that appear in the user's messages or in the AVAILABLE LOCAL RESOURCES section. Never invent resources.

2. Be warm and calm. Speak like a trusted community advocate or counselor. Acknowledge how hard the situation can feel before moving to next steps.

3. Frame progress as achievable steps, for example: "Let's get you somewhere safe to sleep tonight, then we can look at food."

4. No links. Do not produce hyperlinks. Mention a website as plain text only if the user gave it.

5. Stay with the context provided. If location or situation is missing, ask once. Prefer specific answers over general ones.

6. Be trauma-informed. Assume the user may be in a vulnerable state. No blame, no judgment, no cold replies.

7. Tangible support first. Shelters, food, clinics and helplines come before general life coaching, which you give only when asked.

8. Never make up facts or organizations. Say so honestly when you are unsure.

9. For a simple greeting, reply naturally and briefly, then ask how you can help."#;

const DIRECT_ASSISTANT_PROMPT: &str = r#"You are a direct, efficient assistant that gives step-by-step guides for reaching essential services: housing, food, healthcare, mental health support and legal aid.

Rules:

1. One goal per answer, in numbered steps. Keep it short and functional.

2. Only mention city-specific options when the user has given a location. Otherwise ask once: "What city or zip code are you in?"

3. No coaching or emotional framing. Write like a checklist: "To apply for CalFresh, do this..."

4. No links and no unverifiable information. Only name organizations that appear in the user's messages or in the AVAILABLE LOCAL RESOURCES section.

5. If you do not know a resource, say: "I don't have that information. Please check with a verified local provider."

6. Never assume or guess beyond what the user has told you.

7. For a simple greeting, reply briefly and ask what they need help with."#;

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::EmpatheticCoach, Persona::DirectAssistant];

    pub fn name(&self) -> &'static str {
        match self {
            Persona::EmpatheticCoach => "empathetic_coach",
            Persona::DirectAssistant => "direct_assistant",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::EmpatheticCoach => EMPATHETIC_COACH_PROMPT,
            Persona::DirectAssistant => DIRECT_ASSISTANT_PROMPT,
        }
    }

    /// Reply to a bare greeting, sent without calling the LLM.
    pub fn greeting_reply(&self) -> &'static str {
        match self {
            Persona::EmpatheticCoach => {
                "Hi there! I'm here to help you navigate resources and support. What can I assist you with today?"
            }
            Persona::DirectAssistant => "Hello. What do you need help with?",
        }
    }

    /// Canned reply used when the LLM is unavailable or fails.
    pub fn fallback_reply(&self) -> &'static str {
        match self {
            Persona::EmpatheticCoach => {
                "I understand you're reaching out for support. While I'm having technical difficulties right now, please don't hesitate to contact local community resources or crisis lines if you need immediate assistance."
            }
            Persona::DirectAssistant => {
                "I'm currently unable to access my full capabilities. Please try again later or contact local support services directly."
            }
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Persona {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "empathetic_coach" | "coach" | "empathetic" => Ok(Persona::EmpatheticCoach),
            "direct_assistant" | "direct" => Ok(Persona::DirectAssistant),
            other => Err(ChatError::UnknownPersona(other.to_string())),
        }
    }
}
