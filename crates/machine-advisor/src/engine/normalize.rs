use super::domain::{Candidate, Criterion};
use serde::Serialize;

/// Maps `value` into the `[min, max]` frame. A degenerate range yields `0.0`.
///
/// Values outside the frame are not clamped; callers that mix bounds from a
/// different subset get whatever the arithmetic produces.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        return 0.0;
    }
    (value - min) / range
}

/// Observed range of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Per-metric bounds over one candidate subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricBounds {
    pub performance: Bound,
    pub price: Bound,
    pub consumption: Bound,
    pub temperature: Bound,
}

impl MetricBounds {
    /// Single pass over the subset. Returns `None` for an empty subset.
    pub fn from_candidates(candidates: &[Candidate]) -> Option<Self> {
        let (first, rest) = candidates.split_first()?;
        let seed = |criterion: Criterion| {
            let value = first.metrics.value(criterion);
            Bound {
                min: value,
                max: value,
            }
        };

        let mut bounds = Self {
            performance: seed(Criterion::Performance),
            price: seed(Criterion::Price),
            consumption: seed(Criterion::Consumption),
            temperature: seed(Criterion::Temperature),
        };

        for candidate in rest {
            for criterion in Criterion::ordered() {
                bounds
                    .bound_mut(criterion)
                    .include(candidate.metrics.value(criterion));
            }
        }

        Some(bounds)
    }

    pub fn bound(&self, criterion: Criterion) -> Bound {
        match criterion {
            Criterion::Performance => self.performance,
            Criterion::Price => self.price,
            Criterion::Consumption => self.consumption,
            Criterion::Temperature => self.temperature,
        }
    }

    fn bound_mut(&mut self, criterion: Criterion) -> &mut Bound {
        match criterion {
            Criterion::Performance => &mut self.performance,
            Criterion::Price => &mut self.price,
            Criterion::Consumption => &mut self.consumption,
            Criterion::Temperature => &mut self.temperature,
        }
    }
}
