use super::domain::{Criterion, ScoredCandidate, WeightProfile};
use serde::{Deserialize, Serialize};

/// Shown when there is nothing to recommend.
pub const INSUFFICIENT_DATA: &str = "Not enough data to make a recommendation.";

/// Explanation template chosen from the profile's dominant criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeStrategy {
    PriceFocused,
    PerformanceFocused,
    Balanced,
}

impl NarrativeStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceFocused => "Price focused",
            Self::PerformanceFocused => "Performance focused",
            Self::Balanced => "Balanced",
        }
    }

    /// Comparison text for the winner against the runner-up.
    pub fn render(self, winner: &ScoredCandidate, runner_up: &ScoredCandidate) -> String {
        let winner_name = &winner.candidate.name;
        let runner_up_name = &runner_up.candidate.name;
        match self {
            Self::PriceFocused => {
                let savings = runner_up.candidate.metrics.price - winner.candidate.metrics.price;
                format!(
                    "The smart choice is {winner_name}. It competes closely with {runner_up_name} \
                     while letting you save ${savings:.0} without sacrificing quality."
                )
            }
            Self::PerformanceFocused => {
                let gap = winner.candidate.metrics.performance
                    - runner_up.candidate.metrics.performance;
                format!(
                    "For a demanding profile the clear winner is {winner_name}. Its performance \
                     is {gap:.0} points ahead of {runner_up_name}, worth the investment for the \
                     extra power."
                )
            }
            Self::Balanced => format!(
                "{winner_name} is the technical winner. It achieves the best overall balance \
                 (score: {}) and edges out {runner_up_name} across your combined requirements.",
                winner.score
            ),
        }
    }
}

/// Outcome of scanning the weights for the largest coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dominance {
    /// First criterion, in scan order, holding the largest weight.
    pub criterion: Criterion,
    /// Another criterion holds the same largest weight.
    pub contested: bool,
}

/// Scans performance, price, consumption and temperature in that order; a
/// later criterion takes over only when strictly greater.
pub fn dominant_criterion(weights: &WeightProfile) -> Dominance {
    let mut dominance = Dominance {
        criterion: Criterion::Performance,
        contested: false,
    };
    let mut largest = weights.performance;

    for criterion in Criterion::ordered().into_iter().skip(1) {
        let weight = weights.weight(criterion);
        if weight > largest {
            largest = weight;
            dominance = Dominance {
                criterion,
                contested: false,
            };
        } else if weight == largest {
            dominance.contested = true;
        }
    }

    dominance
}

/// Decision table from dominant criterion to narrative strategy.
///
/// Any tie for the largest weight, such as performance and price both at
/// 0.4, selects `Balanced`.
pub fn select_strategy(weights: &WeightProfile) -> NarrativeStrategy {
    let dominance = dominant_criterion(weights);
    if dominance.contested {
        return NarrativeStrategy::Balanced;
    }
    match dominance.criterion {
        Criterion::Price => NarrativeStrategy::PriceFocused,
        Criterion::Performance => NarrativeStrategy::PerformanceFocused,
        Criterion::Consumption | Criterion::Temperature => NarrativeStrategy::Balanced,
    }
}

/// Narrative for a ranked shortlist, prefixed with the profile name.
///
/// Returns the strategy used, or `None` when fewer than two candidates made
/// the comparison impossible.
pub fn narrate(
    profile_name: &str,
    ranked: &[ScoredCandidate],
    weights: &WeightProfile,
) -> (String, Option<NarrativeStrategy>) {
    match ranked {
        [] => (INSUFFICIENT_DATA.to_string(), None),
        [only] => (
            format!(
                "For the {profile_name} profile, the only available option is {}.",
                only.candidate.name
            ),
            None,
        ),
        [winner, runner_up, ..] => {
            let strategy = select_strategy(weights);
            let text = strategy.render(winner, runner_up);
            (format!("For the {profile_name} profile: {text}"), Some(strategy))
        }
    }
}
