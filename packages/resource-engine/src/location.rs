//! Free-text location → canonical region.
//!
//! Case-insensitive substring rules, first match wins. `oakland` is checked
//! before the San Francisco rules because the short `sf` pattern would
//! otherwise capture inputs like "Oakland, near SF".

use tracing::debug;

use crate::types::RegionId;

/// Ordered `(pattern, region)` rules. Patterns are lowercase.
pub const LOCATION_RULES: &[(&str, &str)] = &[
    ("oakland", "oakland"),
    ("berkeley", "berkeley"),
    ("san francisco", "san_francisco"),
    ("sf", "san_francisco"),
];

/// Map user-supplied location text to a region. Never fails; unmatched or
/// empty input resolves to `unknown`.
pub fn normalize(location: &str) -> RegionId {
    let location = location.trim();
    if location.is_empty() {
        return RegionId::unknown();
    }

    let lower = location.to_lowercase();
    let region = LOCATION_RULES
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, region)| RegionId::new(*region))
        .unwrap_or_else(RegionId::unknown);

    debug!(location = %location, region = %region, "Normalized location");
    region
}

/// Same as [`normalize`], treating a missing location as empty.
pub fn normalize_opt(location: Option<&str>) -> RegionId {
    normalize(location.unwrap_or_default())
}
