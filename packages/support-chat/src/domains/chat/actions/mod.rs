//! Chat domain actions
//!
//! Actions are plain async functions over `ChatDeps`. They never touch
//! process-wide state: conversation history is passed in by the caller.

mod analyze_journal;
mod generate_reply;
pub mod greetings;
mod json_reply;
pub mod prompts;
mod score_emotions;
mod summarize_conversation;

pub use analyze_journal::analyze_journal_entry;
pub use generate_reply::{generate_reply, preview_resources, resolve_persona};
pub use json_reply::{extract_json_from_response, parse_json_reply};
pub use score_emotions::score_emotional_state;
pub use summarize_conversation::summarize_conversation;
pub use greetings::is_simple_greeting;
pub use prompts::build_system_prompt;
