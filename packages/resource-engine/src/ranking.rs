//! Additive scoring of resources against a user's situation.
//!
//! Pure functions with no side effects. Truncation is left to the caller so
//! the ranker can be reused for "show all" views.

use serde::{Deserialize, Serialize};

use crate::types::{RankedResource, ResourceRecord};

/// Tunable scoring constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Distance at which the proximity bonus reaches zero (miles)
    pub distance_cap: f64,
    /// Beds strictly above this earn `beds_high_bonus`
    pub beds_high_threshold: u32,
    pub beds_high_bonus: f64,
    /// Beds strictly above this earn `beds_mid_bonus`
    pub beds_mid_threshold: u32,
    pub beds_mid_bonus: f64,
    /// Any beds at all earn `beds_low_bonus`
    pub beds_low_bonus: f64,
    /// Family situation + family service
    pub family_bonus: f64,
    /// Emergency situation + 24/7 hours
    pub emergency_bonus: f64,
    /// Requirements explicitly "none" / "no documentation"
    pub open_requirements_bonus: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            distance_cap: 5.0,
            beds_high_threshold: 20,
            beds_high_bonus: 3.0,
            beds_mid_threshold: 10,
            beds_mid_bonus: 2.0,
            beds_low_bonus: 1.0,
            family_bonus: 2.0,
            emergency_bonus: 2.0,
            open_requirements_bonus: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceRanker {
    weights: RankingWeights,
}

impl ResourceRanker {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Score every resource and order by descending score. Equal scores keep
    /// catalog order. Output length always equals input length.
    pub fn rank(&self, resources: &[ResourceRecord], situation: Option<&str>) -> Vec<RankedResource> {
        let situation = situation.map(str::to_lowercase);
        let mut ranked: Vec<RankedResource> = resources
            .iter()
            .map(|resource| RankedResource {
                score: self.score_lowered(resource, situation.as_deref()),
                resource: resource.clone(),
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Score a single resource.
    pub fn score(&self, resource: &ResourceRecord, situation: Option<&str>) -> f64 {
        let situation = situation.map(str::to_lowercase);
        self.score_lowered(resource, situation.as_deref())
    }

    fn score_lowered(&self, resource: &ResourceRecord, situation: Option<&str>) -> f64 {
        self.distance_score(resource)
            + self.availability_score(resource)
            + self.situation_score(resource, situation)
            + self.requirements_score(resource)
    }

    fn distance_score(&self, resource: &ResourceRecord) -> f64 {
        match resource.distance_miles {
            Some(miles) => (self.weights.distance_cap - miles).max(0.0),
            None => 0.0,
        }
    }

    fn availability_score(&self, resource: &ResourceRecord) -> f64 {
        let w = &self.weights;
        match resource.beds_available {
            Some(beds) if beds > w.beds_high_threshold => w.beds_high_bonus,
            Some(beds) if beds > w.beds_mid_threshold => w.beds_mid_bonus,
            Some(beds) if beds > 0 => w.beds_low_bonus,
            _ => 0.0,
        }
    }

    fn situation_score(&self, resource: &ResourceRecord, situation: Option<&str>) -> f64 {
        let Some(situation) = situation else {
            return 0.0;
        };

        let mut score = 0.0;
        if situation.contains("family")
            && resource
                .services
                .iter()
                .any(|service| service.trim().eq_ignore_ascii_case("family"))
        {
            score += self.weights.family_bonus;
        }
        if situation.contains("emergency")
            && resource
                .hours
                .as_deref()
                .is_some_and(|hours| hours.contains("24/7"))
        {
            score += self.weights.emergency_bonus;
        }
        score
    }

    fn requirements_score(&self, resource: &ResourceRecord) -> f64 {
        match resource.requirements.as_deref().map(str::to_lowercase) {
            Some(req) if req.contains("none") || req.contains("no documentation") => {
                self.weights.open_requirements_bonus
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(name: &str) -> ResourceRecord {
        ResourceRecord::new(name).with_distance(1.0)
    }

    fn names(ranked: &[RankedResource]) -> Vec<&str> {
        ranked.iter().map(|r| r.resource.name.as_str()).collect()
    }

    #[test]
    fn test_distance_score() {
        let ranker = ResourceRanker::default();
        assert_eq!(ranker.score(&ResourceRecord::new("a").with_distance(0.5), None), 4.5);
        assert_eq!(ranker.score(&ResourceRecord::new("b").with_distance(7.0), None), 0.0);
        // Missing distance counts as the cap, not as zero miles
        assert_eq!(ranker.score(&ResourceRecord::new("c"), None), 0.0);
    }

    #[test]
    fn test_bed_thresholds() {
        let ranker = ResourceRanker::default();
        let score = |beds| ranker.score(&ResourceRecord::new("s").with_beds(beds), None);
        assert_eq!(score(25), 3.0);
        assert_eq!(score(21), 3.0);
        assert_eq!(score(20), 2.0);
        assert_eq!(score(11), 2.0);
        assert_eq!(score(10), 1.0);
        assert_eq!(score(1), 1.0);
        assert_eq!(score(0), 0.0);
    }

    #[test]
    fn test_more_beds_outscores_fewer() {
        let ranker = ResourceRanker::default();
        let many = base("many").with_beds(25);
        let few = base("few").with_beds(5);
        assert!(ranker.score(&many, None) > ranker.score(&few, None));

        let ranked = ranker.rank(&[few, many], None);
        assert_eq!(names(&ranked), vec!["many", "few"]);
    }

    #[test]
    fn test_open_requirements_outscore_documentation() {
        let ranker = ResourceRanker::default();
        let open = base("open").with_requirements("no documentation required");
        let strict = base("strict").with_requirements("ID and proof of residency");
        assert!(ranker.score(&open, None) > ranker.score(&strict, None));
    }

    #[test]
    fn test_requirements_none_case_insensitive() {
        let ranker = ResourceRanker::default();
        assert_eq!(ranker.score(&ResourceRecord::new("a").with_requirements("NONE"), None), 2.0);
        assert_eq!(ranker.score(&ResourceRecord::new("b").with_requirements(""), None), 0.0);
    }

    #[test]
    fn test_family_bonus_requires_both_sides() {
        let ranker = ResourceRanker::default();
        let family = base("family").with_service("Family shelter").with_service("Family");
        let plain = base("plain").with_service("Emergency shelter");

        let situation = Some("Family with children");
        assert_eq!(ranker.score(&family, situation) - ranker.score(&plain, situation), 2.0);
        assert_eq!(ranker.score(&family, None), ranker.score(&plain, None));
        assert_eq!(ranker.score(&family, Some("single adult")), ranker.score(&plain, None));
    }

    #[test]
    fn test_family_bonus_matches_whole_service_tag() {
        let ranker = ResourceRanker::default();
        let described = ResourceRecord::new("a").with_service("Family shelter");
        let tagged = ResourceRecord::new("b").with_service(" FAMILY ");

        assert_eq!(ranker.score(&described, Some("family")), 0.0);
        assert_eq!(ranker.score(&tagged, Some("family")), 2.0);
    }

    #[test]
    fn test_emergency_bonus_needs_24_7_hours() {
        let ranker = ResourceRanker::default();
        let always = base("always").with_hours("24/7");
        let daytime = base("daytime").with_hours("Mon-Fri 9am-5pm");
        let unknown = base("unknown");

        let situation = Some("EMERGENCY tonight");
        assert_eq!(ranker.score(&always, situation), 6.0);
        assert_eq!(ranker.score(&daytime, situation), 4.0);
        assert_eq!(ranker.score(&unknown, situation), 4.0);
    }

    #[test]
    fn test_situational_bonuses_stack() {
        let ranker = ResourceRanker::default();
        let resource = base("both").with_hours("24/7").with_service("family");
        assert_eq!(ranker.score(&resource, Some("family emergency")), 8.0);
    }

    #[test]
    fn test_rank_keeps_length() {
        let ranker = ResourceRanker::default();
        let resources = vec![base("a"), ResourceRecord::new("b"), base("c").with_beds(50)];
        assert_eq!(ranker.rank(&resources, Some("family")).len(), 3);
        assert!(ranker.rank(&[], None).is_empty());
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let ranker = ResourceRanker::default();
        let resources = vec![
            base("first"),
            base("top").with_beds(30),
            base("second"),
            base("third"),
        ];
        let ranked = ranker.rank(&resources, None);
        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_descending() {
        let ranker = ResourceRanker::default();
        let resources = vec![
            ResourceRecord::new("far").with_distance(4.5),
            ResourceRecord::new("near").with_distance(0.5),
            ResourceRecord::new("middle").with_distance(2.0),
        ];
        let ranked = ranker.rank(&resources, None);
        assert_eq!(names(&ranked), vec!["near", "middle", "far"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_custom_weights() {
        let ranker = ResourceRanker::new(RankingWeights {
            distance_cap: 10.0,
            open_requirements_bonus: 0.0,
            ..Default::default()
        });
        let resource = ResourceRecord::new("x")
            .with_distance(7.0)
            .with_requirements("None");
        assert_eq!(ranker.score(&resource, None), 3.0);
    }
}
