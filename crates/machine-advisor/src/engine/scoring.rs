use super::domain::{round_score, Candidate, Criterion, ScoredCandidate, WeightProfile};
use super::normalize::MetricBounds;

/// Weighted utility of one candidate.
///
/// Performance contributes its normalized reading directly; price, power
/// consumption and temperature contribute `1 - normalized` so that cheaper,
/// leaner and cooler machines score higher.
pub fn score(candidate: &Candidate, weights: &WeightProfile, bounds: &MetricBounds) -> f64 {
    Criterion::ordered()
        .into_iter()
        .map(|criterion| weights.weight(criterion) * contribution(candidate, criterion, bounds))
        .sum()
}

fn contribution(candidate: &Candidate, criterion: Criterion, bounds: &MetricBounds) -> f64 {
    let normalized = bounds
        .bound(criterion)
        .normalize(candidate.metrics.value(criterion));
    if criterion.higher_is_better() {
        normalized
    } else {
        1.0 - normalized
    }
}

/// Scores every candidate in input order, rounding for presentation.
pub fn score_all(
    candidates: &[Candidate],
    weights: &WeightProfile,
    bounds: &MetricBounds,
) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .map(|candidate| ScoredCandidate {
            candidate: candidate.clone(),
            score: round_score(score(candidate, weights, bounds)),
        })
        .collect()
}
