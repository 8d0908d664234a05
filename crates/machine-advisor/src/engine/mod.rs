//! Multi-criteria decision engine.
//!
//! Every function here is pure: bounds are computed fresh from the candidate
//! subset handed in, so callers may run comparisons concurrently without any
//! coordination.

pub mod coerce;
pub mod domain;
pub mod narrative;
pub mod normalize;
mod orchestrator;
pub mod ranking;
pub mod scoring;

pub use coerce::{parse_non_negative_real, to_non_negative_real};
pub use domain::{
    round_score, BrandId, CalibrationEntry, Candidate, CandidateId, Criterion, MachineCategory,
    MachineMetrics, ProfileId, RankingEntry, ScoredCandidate, UsageProfile, WeightError,
    WeightProfile,
};
pub use narrative::{dominant_criterion, select_strategy, Dominance, NarrativeStrategy};
pub use normalize::{normalize, Bound, MetricBounds};
pub use orchestrator::{CandidateFilter, ComparisonEngine, RankedResult, NO_CANDIDATES};
pub use ranking::DEFAULT_TOP_N;
