//! Domain types shared by the catalog, ranker, and retrieval envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Resource Record
// =============================================================================

/// One aid resource (shelter, food bank, clinic, career center, helpline).
///
/// Only `name` is guaranteed. Every other field distinguishes "absent" from
/// "empty": a missing `requirements` is not the same as `"None"`, and a
/// missing `distance_miles` is not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,

    #[serde(default)]
    pub services: Vec<String>,

    /// Free-text eligibility requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds_available: Option<u32>,

    #[serde(default, alias = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceRecord {
    /// Create a record with only a name; all optional fields absent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone: None,
            hours: None,
            services: Vec::new(),
            requirements: None,
            beds_available: None,
            distance_miles: None,
            description: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(service.into());
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    pub fn with_beds(mut self, beds: u32) -> Self {
        self.beds_available = Some(beds);
        self
    }

    pub fn with_distance(mut self, miles: f64) -> Self {
        self.distance_miles = Some(miles);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Need Category
// =============================================================================

/// Closed set of aid categories. `General` is reserved for the fallback
/// crisis lines and never appears in seeded region data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedCategory {
    Food,
    Shelter,
    Healthcare,
    Employment,
    General,
}

impl NeedCategory {
    /// Categories with keyword lists, in classification priority order.
    pub const CLASSIFIED: [NeedCategory; 4] = [
        NeedCategory::Food,
        NeedCategory::Shelter,
        NeedCategory::Healthcare,
        NeedCategory::Employment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NeedCategory::Food => "food",
            NeedCategory::Shelter => "shelter",
            NeedCategory::Healthcare => "healthcare",
            NeedCategory::Employment => "employment",
            NeedCategory::General => "general",
        }
    }
}

impl fmt::Display for NeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Region Id
// =============================================================================

/// Canonical region key (e.g. `san_francisco`), or `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for RegionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RegionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Retrieval Output
// =============================================================================

/// A resource together with the score the ranker gave it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResource {
    #[serde(flatten)]
    pub resource: ResourceRecord,
    pub score: f64,
}

/// Envelope produced by one retrieval call. Never mutated after construction.
///
/// Every key in `resources_by_category` maps to a non-empty list, and
/// `total_resource_count` is the sum of those list lengths.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalResult {
    pub requested_location: String,
    pub resolved_region: RegionId,
    pub resources_by_category: BTreeMap<NeedCategory, Vec<RankedResource>>,
    pub confidence_by_category: BTreeMap<NeedCategory, f64>,
    pub total_resource_count: usize,
    pub generated_at: DateTime<Utc>,
    /// Explanation attached when specific resources were unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RetrievalResult {
    pub(crate) fn new(
        requested_location: impl Into<String>,
        resolved_region: RegionId,
        resources_by_category: BTreeMap<NeedCategory, Vec<RankedResource>>,
        confidence_by_category: BTreeMap<NeedCategory, f64>,
        note: Option<String>,
    ) -> Self {
        let total_resource_count = resources_by_category.values().map(Vec::len).sum();
        Self {
            requested_location: requested_location.into(),
            resolved_region,
            resources_by_category,
            confidence_by_category,
            total_resource_count,
            generated_at: Utc::now(),
            note,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = NeedCategory> + '_ {
        self.resources_by_category.keys().copied()
    }

    pub fn resources(&self, category: NeedCategory) -> &[RankedResource] {
        self.resources_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn confidence(&self, category: NeedCategory) -> Option<f64> {
        self.confidence_by_category.get(&category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.resources_by_category.is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        self.note.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_legacy_distance_key() {
        let record: ResourceRecord =
            serde_json::from_str(r#"{"name": "Test Pantry", "distance": 1.5}"#).unwrap();
        assert_eq!(record.distance_miles, Some(1.5));
        assert!(record.services.is_empty());
        assert!(record.requirements.is_none());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let json = serde_json::to_value(ResourceRecord::new("Helpline")).unwrap();
        assert_eq!(json["name"], "Helpline");
        assert!(json.get("hours").is_none());
        assert!(json.get("beds_available").is_none());
    }

    #[test]
    fn test_need_category_serializes_lowercase() {
        let json = serde_json::to_string(&NeedCategory::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");
        assert_eq!(NeedCategory::General.to_string(), "general");
    }

    #[test]
    fn test_region_id_unknown() {
        assert!(RegionId::unknown().is_unknown());
        assert!(!RegionId::new("oakland").is_unknown());
        assert_eq!(RegionId::new("oakland"), "oakland");
    }

    #[test]
    fn test_result_total_matches_lists() {
        let mut resources = BTreeMap::new();
        resources.insert(
            NeedCategory::Food,
            vec![RankedResource {
                resource: ResourceRecord::new("A"),
                score: 1.0,
            }],
        );
        resources.insert(
            NeedCategory::Shelter,
            vec![
                RankedResource {
                    resource: ResourceRecord::new("B"),
                    score: 2.0,
                },
                RankedResource {
                    resource: ResourceRecord::new("C"),
                    score: 1.0,
                },
            ],
        );

        let result = RetrievalResult::new(
            "Oakland",
            RegionId::new("oakland"),
            resources,
            BTreeMap::new(),
            None,
        );

        assert_eq!(result.total_resource_count, 3);
        assert_eq!(result.resources(NeedCategory::Shelter).len(), 2);
        assert!(result.resources(NeedCategory::Healthcare).is_empty());
        assert!(!result.is_fallback());
    }
}
