//! Generate reply action - answers one user message with local resources in context

use chrono::Utc;
use llm_client::{CompletionRequest, Message};
use resource_engine::{extract_needs, format_for_prompt, NeedCategory, RetrievalResult};
use tracing::{error, info, warn};

use super::greetings::is_simple_greeting;
use super::prompts::build_system_prompt;
use super::score_emotions::score_emotional_state;
use crate::domains::chat::error::ChatError;
use crate::domains::chat::models::{ChatReply, ChatRequest, ConversationContext};
use crate::domains::chat::persona::Persona;
use crate::kernel::ChatDeps;

/// Generate a reply to a chat message.
///
/// This action:
/// 1. Rejects empty messages
/// 2. Answers bare greetings directly (no retrieval, no LLM)
/// 3. Extracts needs and, when a location is known, retrieves local resources
/// 4. Builds the persona system prompt with user context and resources
/// 5. Sends recent turns plus the new message to the LLM
/// 6. Falls back to the persona's canned reply if the LLM is missing or fails
/// 7. Scores the emotional content of the message (after the reply call)
/// 8. Records the exchange in the conversation
pub async fn generate_reply(
    deps: &ChatDeps,
    conversation: &mut ConversationContext,
    request: &ChatRequest,
) -> Result<ChatReply, ChatError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let persona = resolve_persona(deps, request);

    if is_simple_greeting(message) {
        info!(conversation_id = %conversation.id, persona = %persona, "Greeting, replying directly");
        let response = persona.greeting_reply().to_string();
        conversation.record(message, &response);
        return Ok(ChatReply {
            response,
            persona,
            needs: Vec::new(),
            retrieval: None,
            used_fallback: false,
            emotion_analysis: None,
            generated_at: Utc::now(),
        });
    }

    let context = &request.context;
    let needs: Vec<NeedCategory> = extract_needs(message, context.needs()).into_iter().collect();

    let retrieval = context.location().map(|location| {
        let need_names: Vec<&str> = needs.iter().map(NeedCategory::as_str).collect();
        let result = deps.retriever.retrieve(location, &need_names, context.situation());
        info!(
            conversation_id = %conversation.id,
            region = %result.resolved_region,
            total = result.total_resource_count,
            fallback = result.is_fallback(),
            "Attaching local resources to prompt"
        );
        result
    });

    let resources = retrieval.as_ref().map(format_for_prompt);
    let system_prompt = build_system_prompt(persona, context, resources.as_deref());

    let completion = CompletionRequest::new()
        .system(system_prompt)
        .messages(conversation.history_messages())
        .message(Message::user(message))
        .max_tokens(deps.max_tokens);

    let (response, used_fallback) = match &deps.ai {
        None => {
            warn!(conversation_id = %conversation.id, "No LLM configured, using fallback reply");
            (persona.fallback_reply().to_string(), true)
        }
        Some(ai) => match ai.complete(&completion).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    conversation_id = %conversation.id,
                    reply_length = text.len(),
                    "LLM reply generated"
                );
                (text, false)
            }
            Ok(_) => {
                warn!(conversation_id = %conversation.id, "LLM returned an empty reply, using fallback");
                (persona.fallback_reply().to_string(), true)
            }
            Err(e) => {
                error!(conversation_id = %conversation.id, error = %e, "Failed to generate LLM reply");
                (persona.fallback_reply().to_string(), true)
            }
        },
    };

    let emotion_analysis = score_emotional_state(deps, message).await;

    conversation.record(message, &response);

    Ok(ChatReply {
        response,
        persona,
        needs,
        retrieval,
        used_fallback,
        emotion_analysis: Some(emotion_analysis),
        generated_at: Utc::now(),
    })
}

/// Retrieval-only view of a message: the needs it implies and the local
/// resources for the given location. Never calls the LLM.
pub fn preview_resources(deps: &ChatDeps, request: &ChatRequest) -> Option<RetrievalResult> {
    let context = &request.context;
    let location = context.location()?;
    let needs = extract_needs(&request.message, context.needs());
    let need_names: Vec<&str> = needs.iter().map(NeedCategory::as_str).collect();
    Some(deps.retriever.retrieve(location, &need_names, context.situation()))
}

/// Persona for a request, honoring the per-message override.
pub fn resolve_persona(deps: &ChatDeps, request: &ChatRequest) -> Persona {
    request.persona.unwrap_or(deps.default_persona)
}
