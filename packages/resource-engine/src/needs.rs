//! Keyword classification of need tokens and chat messages.
//!
//! Single-word keywords match anywhere inside a word, so "unemployment" hits
//! `employ` and "seafood" hits `food`. Short keywords that hide inside common
//! unrelated words carry an exclusion list: "great" does not hit `eat` and
//! "parent" does not hit `rent`. Multi-word keywords match as a phrase over
//! the normalized word sequence.

use std::collections::BTreeSet;

use crate::types::NeedCategory;

/// Category used whenever nothing matches.
pub const DEFAULT_NEED: NeedCategory = NeedCategory::Food;

const FOOD_KEYWORDS: &[&str] = &["food", "hungry", "eat", "meal", "grocery", "groceries"];
const SHELTER_KEYWORDS: &[&str] = &[
    "shelter",
    "housing",
    "homeless",
    "sleep",
    "bed",
    "rent",
    "place to stay",
];
const HEALTHCARE_KEYWORDS: &[&str] = &["health", "medical", "doctor", "clinic", "sick"];
const EMPLOYMENT_KEYWORDS: &[&str] = &["job", "work", "employ", "income", "career"];

/// Words containing one of these stems never count as a hit for the keyword.
const EXCLUSIONS: &[(&str, &[&str])] = &[
    (
        "eat",
        &[
            "great", "creat", "treat", "threat", "sweat", "seat", "heat", "beat", "peat",
            "weather", "theat", "death", "breath",
        ],
    ),
    ("rent", &["parent", "current", "different", "torrent"]),
    ("bed", &["scribed", "robed", "orbed", "embed"]),
    ("work", &["network", "framework"]),
];

/// Keyword list for a category. `General` has none.
pub fn keywords(category: NeedCategory) -> &'static [&'static str] {
    match category {
        NeedCategory::Food => FOOD_KEYWORDS,
        NeedCategory::Shelter => SHELTER_KEYWORDS,
        NeedCategory::Healthcare => HEALTHCARE_KEYWORDS,
        NeedCategory::Employment => EMPLOYMENT_KEYWORDS,
        NeedCategory::General => &[],
    }
}

/// Every category whose keywords appear in `text`, in priority order
/// (food, shelter, healthcare, employment).
pub fn matching_categories(text: &str) -> Vec<NeedCategory> {
    let words = words(text);
    if words.is_empty() {
        return Vec::new();
    }

    NeedCategory::CLASSIFIED
        .into_iter()
        .filter(|category| {
            keywords(*category)
                .iter()
                .any(|keyword| keyword_matches(&words, keyword))
        })
        .collect()
}

/// Classify a need token or message into one category; first match in
/// priority order wins, otherwise [`DEFAULT_NEED`].
pub fn classify(need: &str) -> NeedCategory {
    matching_categories(need)
        .into_iter()
        .next()
        .unwrap_or(DEFAULT_NEED)
}

/// Union of categories found in the message and in the stated-needs context
/// field. Never empty: falls back to `{DEFAULT_NEED}`.
pub fn extract_needs(message: &str, context_needs: Option<&str>) -> BTreeSet<NeedCategory> {
    let mut needs: BTreeSet<NeedCategory> = matching_categories(message).into_iter().collect();

    if let Some(context_needs) = context_needs {
        needs.extend(matching_categories(context_needs));
    }

    if needs.is_empty() {
        needs.insert(DEFAULT_NEED);
    }
    needs
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn exclusions(keyword: &str) -> &'static [&'static str] {
    EXCLUSIONS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, stems)| *stems)
        .unwrap_or(&[])
}

fn keyword_matches(words: &[String], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split(' ').collect();
    match parts.as_slice() {
        [single] => {
            let excluded = exclusions(single);
            words.iter().any(|w| {
                w.contains(single) && !excluded.iter().any(|stem| w.contains(stem))
            })
        }
        phrase => words
            .windows(phrase.len())
            .any(|window| window.iter().zip(phrase).all(|(w, p)| w == p)),
    }
}
