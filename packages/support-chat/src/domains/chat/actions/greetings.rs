//! Bare-greeting detection.

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "sup",
    "what's up",
];

/// Longest message, in words, still treated as a bare greeting.
const MAX_GREETING_WORDS: usize = 3;

/// True for short messages like "hi", "Hello!" or "hey there".
///
/// Greetings match whole words, so "this" or "they" never count as "hi"/"hey".
pub fn is_simple_greeting(message: &str) -> bool {
    let lowered = message.trim().to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() || words.len() > MAX_GREETING_WORDS {
        return false;
    }

    GREETINGS.iter().any(|greeting| {
        let phrase: Vec<&str> = greeting.split(' ').collect();
        words.windows(phrase.len()).any(|window| window == phrase.as_slice())
    })
}
