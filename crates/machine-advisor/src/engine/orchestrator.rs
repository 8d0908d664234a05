use super::domain::{
    round_score, BrandId, CalibrationEntry, Candidate, MachineCategory, RankingEntry,
    ScoredCandidate, UsageProfile, WeightProfile,
};
use super::narrative::{dominant_criterion, narrate, Dominance, NarrativeStrategy};
use super::normalize::MetricBounds;
use super::ranking::{descending, rank, top_n, DEFAULT_TOP_N};
use super::scoring::{score, score_all};
use serde::Serialize;

/// Narrative returned when filtering leaves nothing to compare.
pub const NO_CANDIDATES: &str =
    "No models are available for this selection; there is not enough data to compare.";

/// Restricts the candidate subset before bounds are computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    Category(MachineCategory),
    Brand(BrandId),
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            Self::Category(category) => candidate.category == *category,
            Self::Brand(brand) => candidate.brand_id.as_ref() == Some(brand),
        }
    }
}

/// Shortlist plus the explanation shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub ranked: Vec<ScoredCandidate>,
    pub narrative: String,
    pub strategy: Option<NarrativeStrategy>,
    #[serde(skip)]
    pub dominance: Option<Dominance>,
    /// Size of the subset that was scored, before truncation.
    pub evaluated: usize,
}

impl RankedResult {
    fn empty() -> Self {
        Self {
            ranked: Vec::new(),
            narrative: NO_CANDIDATES.to_string(),
            strategy: None,
            dominance: None,
            evaluated: 0,
        }
    }

    pub fn entries(&self) -> Vec<RankingEntry> {
        self.ranked.iter().map(ScoredCandidate::entry).collect()
    }
}

/// Stateless composition of bounds, scoring, ranking and narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonEngine {
    top_n: usize,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl ComparisonEngine {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Live recommendation over the candidates that pass every filter.
    pub fn compare(
        &self,
        candidates: &[Candidate],
        profile: &UsageProfile,
        filters: &[CandidateFilter],
    ) -> RankedResult {
        let subset: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| filters.iter().all(|filter| filter.matches(candidate)))
            .cloned()
            .collect();

        let Some(bounds) = MetricBounds::from_candidates(&subset) else {
            return RankedResult::empty();
        };

        let scored = score_all(&subset, &profile.weights, &bounds);
        let ranked = top_n(rank(scored), self.top_n);
        let (narrative, strategy) = narrate(&profile.name, &ranked, &profile.weights);

        RankedResult {
            ranked,
            narrative,
            strategy,
            dominance: Some(dominant_criterion(&profile.weights)),
            evaluated: subset.len(),
        }
    }

    /// Scores the whole subset under both profiles against shared bounds,
    /// ordered by the proposed score.
    pub fn calibrate(
        &self,
        candidates: &[Candidate],
        current: &WeightProfile,
        proposed: &WeightProfile,
    ) -> Vec<CalibrationEntry> {
        let Some(bounds) = MetricBounds::from_candidates(candidates) else {
            return Vec::new();
        };

        let mut entries: Vec<CalibrationEntry> = candidates
            .iter()
            .map(|candidate| {
                let under_current = score(candidate, current, &bounds);
                let under_proposed = score(candidate, proposed, &bounds);
                CalibrationEntry {
                    candidate: candidate.clone(),
                    score_under_current: round_score(under_current),
                    score_under_proposed: round_score(under_proposed),
                    delta: round_score(under_proposed - under_current),
                }
            })
            .collect();

        entries.sort_by(|left, right| {
            descending(left.score_under_proposed, right.score_under_proposed)
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domain::{CandidateId, MachineMetrics, ProfileId};
    use crate::engine::narrative::INSUFFICIENT_DATA;

    fn machine(
        name: &str,
        category: MachineCategory,
        brand: &str,
        metrics: [f64; 4],
    ) -> Candidate {
        let [performance, price, power_consumption, temperature] = metrics;
        Candidate {
            id: CandidateId(name.to_lowercase()),
            name: name.to_string(),
            category,
            brand_id: Some(BrandId(brand.to_string())),
            metrics: MachineMetrics {
                performance,
                price,
                power_consumption,
                temperature,
            },
        }
    }

    fn profile(weights: [f64; 4]) -> UsageProfile {
        let [performance, price, consumption, temperature] = weights;
        UsageProfile {
            id: ProfileId("p-1".to_string()),
            name: "Gaming".to_string(),
            description: String::new(),
            weights: WeightProfile {
                performance,
                price,
                consumption,
                temperature,
            },
        }
    }

    fn catalog() -> Vec<Candidate> {
        vec![
            machine("Forge", MachineCategory::Desktop, "acme", [95.0, 1500.0, 350.0, 70.0]),
            machine("Pebble", MachineCategory::Laptop, "acme", [55.0, 600.0, 45.0, 50.0]),
            machine("Aurora", MachineCategory::Laptop, "zen", [80.0, 1100.0, 90.0, 65.0]),
            machine("Tower", MachineCategory::Desktop, "zen", [85.0, 1000.0, 280.0, 60.0]),
        ]
    }

    #[test]
    fn compare_truncates_to_configured_shortlist() {
        let engine = ComparisonEngine::default();
        let result = engine.compare(&catalog(), &profile([0.7, 0.1, 0.1, 0.1]), &[]);

        assert_eq!(result.ranked.len(), 3);
        assert_eq!(result.evaluated, 4);
        assert_eq!(result.ranked[0].candidate.name, "Forge");
        assert_eq!(result.strategy, Some(NarrativeStrategy::PerformanceFocused));
        assert!(result.narrative.contains("Forge"));
        assert!(result
            .ranked
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));

        let narrow = ComparisonEngine::new(1);
        assert_eq!(narrow.top_n(), 1);
        assert_eq!(engine.top_n(), DEFAULT_TOP_N);
        let single = narrow.compare(&catalog(), &profile([0.7, 0.1, 0.1, 0.1]), &[]);
        assert_eq!(single.ranked.len(), 1);
    }

    #[test]
    fn filters_recompute_bounds_on_the_subset() {
        let engine = ComparisonEngine::default();
        let laptops = [CandidateFilter::Category(MachineCategory::Laptop)];

        let result = engine.compare(&catalog(), &profile([0.0, 1.0, 0.0, 0.0]), &laptops);

        assert_eq!(result.evaluated, 2);
        assert_eq!(result.ranked[0].candidate.name, "Pebble");
        // Cheapest laptop normalizes to 0 within the laptop-only frame.
        assert_eq!(result.ranked[0].score, 1.0);
        assert_eq!(result.ranked[1].score, 0.0);
        assert!(result.narrative.contains("save $500"));
    }

    #[test]
    fn filters_combine() {
        let engine = ComparisonEngine::default();
        let filters = [
            CandidateFilter::Brand(BrandId("zen".to_string())),
            CandidateFilter::Category(MachineCategory::Desktop),
        ];

        let result = engine.compare(&catalog(), &profile([0.25, 0.25, 0.25, 0.25]), &filters);

        assert_eq!(result.evaluated, 1);
        assert_eq!(
            result.narrative,
            "For the Gaming profile, the only available option is Tower."
        );
        assert!(result.strategy.is_none());
    }

    #[test]
    fn empty_subset_returns_message_without_scoring() {
        let engine = ComparisonEngine::default();
        let filters = [CandidateFilter::Brand(BrandId("unknown".to_string()))];

        let result = engine.compare(&catalog(), &profile([0.25, 0.25, 0.25, 0.25]), &filters);

        assert!(result.ranked.is_empty());
        assert_eq!(result.narrative, NO_CANDIDATES);
        assert!(!result.narrative.is_empty());
        assert_ne!(result.narrative, INSUFFICIENT_DATA);

        let nothing = engine.compare(&[], &profile([0.25, 0.25, 0.25, 0.25]), &[]);
        assert!(nothing.ranked.is_empty());
    }

    #[test]
    fn calibrate_with_same_profile_has_zero_delta() {
        let engine = ComparisonEngine::default();
        let weights = profile([0.4, 0.3, 0.2, 0.1]).weights;

        let entries = engine.calibrate(&catalog(), &weights, &weights);

        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|entry| entry.delta == 0.0));
        assert!(entries
            .iter()
            .all(|entry| entry.score_under_current == entry.score_under_proposed));
    }

    #[test]
    fn calibrate_ties_keep_catalog_order() {
        let engine = ComparisonEngine::default();
        let same_price = |name: &str, performance: f64| {
            machine(name, MachineCategory::Laptop, "acme", [performance, 900.0, 40.0, 50.0])
        };
        let candidates = [
            same_price("x", 60.0),
            same_price("y", 95.0),
            same_price("z", 70.0),
            same_price("w", 88.0),
        ];
        let current = profile([1.0, 0.0, 0.0, 0.0]).weights;
        let proposed = profile([0.0, 1.0, 0.0, 0.0]).weights;

        let entries = engine.calibrate(&candidates, &current, &proposed);

        let names: Vec<_> = entries.iter().map(|e| e.candidate.name.as_str()).collect();
        assert_eq!(names, ["x", "y", "z", "w"]);
        assert!(entries.iter().all(|entry| entry.score_under_proposed == 1.0));
    }

    #[test]
    fn calibrate_sorts_by_proposed_score() {
        let engine = ComparisonEngine::default();
        let current = profile([1.0, 0.0, 0.0, 0.0]).weights;
        let proposed = profile([0.0, 1.0, 0.0, 0.0]).weights;

        let entries = engine.calibrate(&catalog(), &current, &proposed);

        let names: Vec<_> = entries.iter().map(|e| e.candidate.name.as_str()).collect();
        assert_eq!(names, ["Pebble", "Tower", "Aurora", "Forge"]);
        let forge = &entries[3];
        assert_eq!(forge.score_under_current, 1.0);
        assert_eq!(forge.score_under_proposed, 0.0);
        assert_eq!(forge.delta, -1.0);
        assert!(engine.calibrate(&[], &current, &proposed).is_empty());
    }
}
