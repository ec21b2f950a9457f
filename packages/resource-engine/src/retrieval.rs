//! Retrieval orchestration: location → region → per-need ranking → envelope.
//!
//! Infallible at request time. Unknown regions take the fallback branch and
//! return general crisis lines with a low fixed confidence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::ResourceCatalog;
use crate::location::normalize;
use crate::needs::{classify, DEFAULT_NEED};
use crate::ranking::{RankingWeights, ResourceRanker};
use crate::types::{NeedCategory, RankedResource, RegionId, ResourceRecord, RetrievalResult};

/// Retrieval policy knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Resources kept per category after ranking
    pub max_per_category: usize,
    /// Confidence reported for the fallback crisis lines
    pub fallback_confidence: f64,
    /// Divisor that maps an average score into [0, 1]
    pub confidence_scale: f64,
    pub ranking: RankingWeights,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_per_category: 3,
            fallback_confidence: 0.3,
            confidence_scale: 10.0,
            ranking: RankingWeights::default(),
        }
    }
}

/// Confidence of a kept list: average score scaled by how close the list is
/// to a full page, bounded to [0, 1]. Empty lists score 0.
pub fn confidence(kept: &[RankedResource], full_page: usize, scale: f64) -> f64 {
    if kept.is_empty() {
        return 0.0;
    }
    let count = kept.len() as f64;
    let average = kept.iter().map(|r| r.score).sum::<f64>() / count;
    let count_factor = (count / full_page.max(1) as f64).min(1.0);
    ((average * count_factor) / scale).clamp(0.0, 1.0)
}

/// Crisis lines served when a location has no catalog data.
pub fn fallback_resources() -> Vec<ResourceRecord> {
    vec![
        ResourceRecord::new("211 Bay Area")
            .with_phone("2-1-1")
            .with_service("Resource referrals")
            .with_service("Crisis support")
            .with_description("Call 211 for local resource information in your area"),
        ResourceRecord::new("988 Suicide & Crisis Lifeline")
            .with_phone("988")
            .with_service("Crisis support")
            .with_service("Mental health")
            .with_description("24/7 crisis support and mental health resources"),
    ]
}

/// Drives normalization, classification, ranking, and truncation over a
/// shared read-only catalog. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ResourceRetriever {
    catalog: Arc<ResourceCatalog>,
    ranker: ResourceRanker,
    config: RetrievalConfig,
}

impl ResourceRetriever {
    pub fn new(catalog: Arc<ResourceCatalog>) -> Self {
        Self::with_config(catalog, RetrievalConfig::default())
    }

    pub fn with_config(catalog: Arc<ResourceCatalog>, config: RetrievalConfig) -> Self {
        Self {
            catalog,
            ranker: ResourceRanker::new(config.ranking.clone()),
            config,
        }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve ranked resources for each requested need at a location.
    ///
    /// Needs are free-text tokens; each is classified, and needs that map to
    /// the same category are processed once. An empty need list means the
    /// default need. Categories without data in the region are omitted.
    pub fn retrieve<S: AsRef<str>>(
        &self,
        location: &str,
        needs: &[S],
        situation: Option<&str>,
    ) -> RetrievalResult {
        let region = normalize(location);
        if region.is_unknown() || !self.catalog.contains_region(&region) {
            return self.fallback(location, region);
        }

        let mut categories: Vec<NeedCategory> = Vec::new();
        for need in needs {
            let category = classify(need.as_ref());
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        if categories.is_empty() {
            categories.push(DEFAULT_NEED);
        }

        let mut resources_by_category = BTreeMap::new();
        let mut confidence_by_category = BTreeMap::new();

        for category in categories {
            let Some(list) = self.catalog.resources(&region, category) else {
                debug!(region = %region, category = %category, "No resources for category");
                continue;
            };

            let mut ranked = self.ranker.rank(list, situation);
            ranked.truncate(self.config.max_per_category);
            if ranked.is_empty() {
                continue;
            }

            let score = confidence(
                &ranked,
                self.config.max_per_category,
                self.config.confidence_scale,
            );
            debug!(
                region = %region,
                category = %category,
                kept = ranked.len(),
                confidence = score,
                "Ranked category"
            );

            resources_by_category.insert(category, ranked);
            confidence_by_category.insert(category, score);
        }

        let result = RetrievalResult::new(
            location,
            region,
            resources_by_category,
            confidence_by_category,
            None,
        );

        info!(
            region = %result.resolved_region,
            categories = result.resources_by_category.len(),
            total = result.total_resource_count,
            "Retrieved local resources"
        );
        result
    }

    fn fallback(&self, location: &str, region: RegionId) -> RetrievalResult {
        warn!(
            location = %location,
            region = %region,
            "No catalog data for location, serving general crisis resources"
        );

        let resources = fallback_resources()
            .into_iter()
            .map(|resource| RankedResource {
                resource,
                score: 0.0,
            })
            .collect();

        let mut resources_by_category = BTreeMap::new();
        resources_by_category.insert(NeedCategory::General, resources);

        let mut confidence_by_category = BTreeMap::new();
        confidence_by_category.insert(NeedCategory::General, self.config.fallback_confidence);

        let shown = if location.trim().is_empty() {
            "your location"
        } else {
            location
        };

        RetrievalResult::new(
            location,
            RegionId::unknown(),
            resources_by_category,
            confidence_by_category,
            Some(format!(
                "Specific resources for {shown} not available. Showing general resources."
            )),
        )
    }
}
