//! Plain-text rendering of a retrieval result for LLM prompt injection.

use std::fmt::Write;

use crate::types::RetrievalResult;

/// Returned when a result holds no resources at all.
pub const NO_RESOURCES_MESSAGE: &str =
    "No specific local resources found. Recommend calling 211 for local assistance.";

/// Render one section per category, listing name, address, phone, hours, and
/// requirements (only when present).
pub fn format_for_prompt(result: &RetrievalResult) -> String {
    if result.is_empty() {
        return NO_RESOURCES_MESSAGE.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Local resources near {}:", result.requested_location);
    if let Some(note) = &result.note {
        let _ = writeln!(out, "Note: {note}");
    }
    out.push('\n');

    for (category, resources) in &result.resources_by_category {
        if resources.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{} RESOURCES:", category.as_str().to_uppercase());
        for ranked in resources {
            let r = &ranked.resource;
            let _ = writeln!(out, "• {}", r.name);
            let _ = writeln!(
                out,
                "  Address: {}",
                r.address.as_deref().unwrap_or("Call for address")
            );
            let _ = writeln!(out, "  Phone: {}", r.phone.as_deref().unwrap_or("N/A"));
            let _ = writeln!(
                out,
                "  Hours: {}",
                r.hours.as_deref().unwrap_or("Call for hours")
            );
            if let Some(requirements) = r.requirements.as_deref().filter(|s| !s.is_empty()) {
                let _ = writeln!(out, "  Requirements: {requirements}");
            }
            out.push('\n');
        }
    }

    out
}
