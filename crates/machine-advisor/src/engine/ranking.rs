use super::domain::ScoredCandidate;
use std::cmp::Ordering;

/// Shortlist size used for live recommendations.
pub const DEFAULT_TOP_N: usize = 3;

/// Orders candidates by descending score.
///
/// `sort_by` is stable, so candidates with exactly equal scores keep their
/// input order; that is the only tie-break.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(|left, right| descending(left.score, right.score));
    scored
}

/// Truncates an already ranked sequence to its first `n` entries.
pub fn top_n(mut ranked: Vec<ScoredCandidate>, n: usize) -> Vec<ScoredCandidate> {
    ranked.truncate(n);
    ranked
}

pub(crate) fn descending(left: f64, right: f64) -> Ordering {
    right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}
