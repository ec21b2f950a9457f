//! System prompt assembly

use std::fmt::Write;

use crate::domains::chat::models::UserContext;
use crate::domains::chat::persona::Persona;

/// Persona prompt, then the user's context, then any retrieved resources.
///
/// The context block is left out when the user shared nothing; the resource
/// block is left out when retrieval did not run.
pub fn build_system_prompt(
    persona: Persona,
    context: &UserContext,
    resources: Option<&str>,
) -> String {
    let mut prompt = persona.system_prompt().to_string();

    let mut context_info = String::new();
    if let Some(location) = context.location() {
        let _ = write!(context_info, "\nUser location: {location}");
    }
    if let Some(situation) = context.situation() {
        let _ = write!(context_info, "\nUser situation: {situation}");
    }
    if let Some(needs) = context.needs() {
        let _ = write!(context_info, "\nUser needs: {needs}");
    }
    if let Some(name) = context.name() {
        let _ = write!(context_info, "\nUser name: {name}");
    }
    if !context_info.is_empty() {
        prompt.push_str("\n\nCURRENT USER CONTEXT:");
        prompt.push_str(&context_info);
    }

    if let Some(resources) = resources.filter(|r| !r.trim().is_empty()) {
        prompt.push_str("\n\nAVAILABLE LOCAL RESOURCES:\n");
        prompt.push_str(resources);
    }

    prompt
}
