//! Read-only resource catalog, keyed by region then category.
//!
//! Loaded once at startup and shared (behind an `Arc`) by every retrieval.
//! Region aliasing is per category: a region may own some categories and
//! borrow others from a neighbor. Borrowed lists share the neighbor's
//! allocation rather than copying records.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::types::{NeedCategory, RegionId, ResourceRecord};

/// Seed compiled into the crate.
const SEED_JSON: &str = include_str!("../data/catalog.json");

// =============================================================================
// Seed Format
// =============================================================================

#[derive(Debug, Deserialize)]
struct CatalogSeed {
    regions: BTreeMap<String, BTreeMap<NeedCategory, Vec<ResourceRecord>>>,
    #[serde(default)]
    aliases: Vec<AliasSeed>,
}

#[derive(Debug, Deserialize)]
struct AliasSeed {
    region: String,
    category: NeedCategory,
    target: String,
}

// =============================================================================
// Catalog
// =============================================================================

type CategoryLists = HashMap<NeedCategory, Arc<[ResourceRecord]>>;

#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    regions: HashMap<RegionId, CategoryLists>,
}

impl ResourceCatalog {
    /// Load the catalog bundled with the crate.
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_JSON)
    }

    /// Load a catalog from a JSON document in the seed format.
    pub fn from_json(json: &str) -> Result<Self> {
        let seed: CatalogSeed = serde_json::from_str(json)?;
        Self::build(seed)
    }

    /// Load a catalog from a JSON file in the seed format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading resource catalog from file");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn build(seed: CatalogSeed) -> Result<Self> {
        let mut regions: HashMap<RegionId, CategoryLists> = HashMap::new();

        for (region, categories) in seed.regions {
            let mut lists = CategoryLists::new();
            for (category, records) in categories {
                validate_list(&region, category, &records)?;
                lists.insert(category, Arc::from(records));
            }
            regions.insert(RegionId::new(region), lists);
        }

        // Resolve against owned lists only, so alias chains are rejected.
        let mut resolved = Vec::with_capacity(seed.aliases.len());
        for alias in &seed.aliases {
            let region = RegionId::new(alias.region.as_str());
            if regions
                .get(&region)
                .is_some_and(|lists| lists.contains_key(&alias.category))
            {
                return Err(CatalogError::ShadowingAlias {
                    region: alias.region.clone(),
                    category: alias.category,
                });
            }

            let target = regions
                .get(&RegionId::new(alias.target.as_str()))
                .and_then(|lists| lists.get(&alias.category))
                .cloned()
                .ok_or_else(|| CatalogError::DanglingAlias {
                    region: alias.region.clone(),
                    category: alias.category,
                    target: alias.target.clone(),
                })?;

            resolved.push((region, alias.category, target));
        }

        for (region, category, list) in resolved {
            regions.entry(region).or_default().insert(category, list);
        }

        let catalog = Self { regions };
        info!(
            regions = catalog.regions.len(),
            aliases = seed.aliases.len(),
            "Resource catalog loaded"
        );
        Ok(catalog)
    }

    /// Resources for a region and category, in catalog order.
    pub fn resources(&self, region: &RegionId, category: NeedCategory) -> Option<&[ResourceRecord]> {
        self.regions
            .get(region)
            .and_then(|lists| lists.get(&category))
            .map(|list| &**list)
    }

    pub fn contains_region(&self, region: &RegionId) -> bool {
        self.regions.contains_key(region)
    }

    /// Known region ids, sorted.
    pub fn regions(&self) -> Vec<&RegionId> {
        let mut ids: Vec<_> = self.regions.keys().collect();
        ids.sort();
        ids
    }

    /// Categories available for a region (owned or aliased), sorted.
    pub fn categories(&self, region: &RegionId) -> Vec<NeedCategory> {
        let mut categories: Vec<_> = self
            .regions
            .get(region)
            .map(|lists| lists.keys().copied().collect())
            .unwrap_or_default();
        categories.sort();
        categories
    }

    /// True when two regions serve the same list for a category.
    pub fn shares_list(&self, a: &RegionId, b: &RegionId, category: NeedCategory) -> bool {
        let list = |region: &RegionId| self.regions.get(region).and_then(|l| l.get(&category));
        match (list(a), list(b)) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }
}

fn validate_list(region: &str, category: NeedCategory, records: &[ResourceRecord]) -> Result<()> {
    if category == NeedCategory::General {
        return Err(CatalogError::ReservedCategory {
            region: region.to_string(),
        });
    }
    if records.is_empty() {
        return Err(CatalogError::EmptyCategory {
            region: region.to_string(),
            category,
        });
    }

    for (index, record) in records.iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                region: region.to_string(),
                category,
                index,
            });
        }
        if let Some(distance) = record.distance_miles {
            if !distance.is_finite() || distance < 0.0 {
                return Err(CatalogError::InvalidDistance {
                    region: region.to_string(),
                    category,
                    name: record.name.clone(),
                    distance,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: &str) -> RegionId {
        RegionId::new(id)
    }

    #[test]
    fn test_seeded_catalog_loads() {
        let catalog = ResourceCatalog::seeded().unwrap();

        let food = catalog
            .resources(&region("san_francisco"), NeedCategory::Food)
            .unwrap();
        assert_eq!(food.len(), 3);
        assert_eq!(food[0].name, "SF-Marin Food Bank");

        assert_eq!(
            catalog.categories(&region("oakland")),
            vec![NeedCategory::Food, NeedCategory::Shelter]
        );
    }

    #[test]
    fn test_berkeley_aliases_per_category() {
        let catalog = ResourceCatalog::seeded().unwrap();
        let berkeley = region("berkeley");
        let oakland = region("oakland");

        assert!(catalog.shares_list(&berkeley, &oakland, NeedCategory::Food));
        assert!(catalog.shares_list(&berkeley, &oakland, NeedCategory::Shelter));

        let healthcare = catalog.resources(&berkeley, NeedCategory::Healthcare).unwrap();
        assert_eq!(healthcare[0].name, "Berkeley Free Clinic");
        assert!(catalog.resources(&oakland, NeedCategory::Healthcare).is_none());
    }

    #[test]
    fn test_seeded_records_keep_absent_fields() {
        let catalog = ResourceCatalog::seeded().unwrap();
        let food = catalog
            .resources(&region("san_francisco"), NeedCategory::Food)
            .unwrap();
        assert!(food.iter().all(|r| r.beds_available.is_none()));
    }

    #[test]
    fn test_unknown_region_has_no_resources() {
        let catalog = ResourceCatalog::seeded().unwrap();
        assert!(!catalog.contains_region(&RegionId::unknown()));
        assert!(catalog.resources(&RegionId::unknown(), NeedCategory::Food).is_none());
        assert!(catalog.categories(&RegionId::unknown()).is_empty());
    }

    #[test]
    fn test_rejects_empty_name() {
        let json = r#"{"regions": {"x": {"food": [{"name": "  "}]}}}"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName { index: 0, .. }));
    }

    #[test]
    fn test_rejects_negative_distance() {
        let json = r#"{"regions": {"x": {"food": [{"name": "A", "distance_miles": -1.0}]}}}"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDistance { .. }));
    }

    #[test]
    fn test_rejects_empty_category() {
        let json = r#"{"regions": {"x": {"shelter": []}}}"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyCategory {
                category: NeedCategory::Shelter,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_general_in_seed() {
        let json = r#"{"regions": {"x": {"general": [{"name": "A"}]}}}"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::ReservedCategory { .. }));
    }

    #[test]
    fn test_rejects_dangling_alias() {
        let json = r#"{
            "regions": {"x": {"food": [{"name": "A"}]}},
            "aliases": [{"region": "y", "category": "shelter", "target": "x"}]
        }"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DanglingAlias { .. }));
    }

    #[test]
    fn test_rejects_alias_chain() {
        let json = r#"{
            "regions": {"x": {"food": [{"name": "A"}]}},
            "aliases": [
                {"region": "y", "category": "food", "target": "x"},
                {"region": "z", "category": "food", "target": "y"}
            ]
        }"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DanglingAlias { .. }));
    }

    #[test]
    fn test_rejects_shadowing_alias() {
        let json = r#"{
            "regions": {
                "x": {"food": [{"name": "A"}]},
                "y": {"food": [{"name": "B"}]}
            },
            "aliases": [{"region": "y", "category": "food", "target": "x"}]
        }"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::ShadowingAlias { .. }));
    }

    #[test]
    fn test_alias_creates_region() {
        let json = r#"{
            "regions": {"x": {"food": [{"name": "A"}]}},
            "aliases": [{"region": "y", "category": "food", "target": "x"}]
        }"#;
        let catalog = ResourceCatalog::from_json(json).unwrap();
        assert!(catalog.contains_region(&region("y")));
        assert_eq!(catalog.regions().len(), 2);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ResourceCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
