use super::coerce::lenient_real;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal digits kept on presented scores.
pub const SCORE_DECIMALS: i32 = 4;

/// Rounds a score to [`SCORE_DECIMALS`] places.
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Form factor of a catalog machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineCategory {
    Desktop,
    Laptop,
}

impl MachineCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop PC",
            Self::Laptop => "Laptop",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desktop" | "pc" | "desktop pc" => Some(Self::Desktop),
            "laptop" | "notebook" => Some(Self::Laptop),
            _ => None,
        }
    }
}

/// The four competing criteria, in the order used for dominance scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Performance,
    Price,
    Consumption,
    Temperature,
}

impl Criterion {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Performance,
            Self::Price,
            Self::Consumption,
            Self::Temperature,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Price => "Price",
            Self::Consumption => "Power consumption",
            Self::Temperature => "Temperature",
        }
    }

    /// Whether a larger raw reading is preferable.
    pub const fn higher_is_better(self) -> bool {
        matches!(self, Self::Performance)
    }
}

/// Raw readings for a machine. Every field tolerates missing or junk input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineMetrics {
    #[serde(default, deserialize_with = "lenient_real")]
    pub performance: f64,
    #[serde(default, deserialize_with = "lenient_real")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_real")]
    pub power_consumption: f64,
    #[serde(default, deserialize_with = "lenient_real")]
    pub temperature: f64,
}

impl MachineMetrics {
    pub fn value(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Performance => self.performance,
            Criterion::Price => self.price,
            Criterion::Consumption => self.power_consumption,
            Criterion::Temperature => self.temperature,
        }
    }
}

/// A catalog machine evaluated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub category: MachineCategory,
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(flatten)]
    pub metrics: MachineMetrics,
}

/// Raw linear-combination coefficients, one per criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    #[serde(default, deserialize_with = "lenient_real")]
    pub performance: f64,
    #[serde(default, deserialize_with = "lenient_real")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_real")]
    pub consumption: f64,
    #[serde(default, deserialize_with = "lenient_real")]
    pub temperature: f64,
}

impl WeightProfile {
    /// Validated constructor for weights entered by an operator.
    pub fn try_new(
        performance: f64,
        price: f64,
        consumption: f64,
        temperature: f64,
    ) -> Result<Self, WeightError> {
        let weights = Self {
            performance,
            price,
            consumption,
            temperature,
        };
        for criterion in Criterion::ordered() {
            let value = weights.weight(criterion);
            if !value.is_finite() || value < 0.0 {
                return Err(WeightError::Invalid { criterion, value });
            }
        }
        Ok(weights)
    }

    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Performance => self.performance,
            Criterion::Price => self.price,
            Criterion::Consumption => self.consumption,
            Criterion::Temperature => self.temperature,
        }
    }

    pub fn validate(self) -> Result<Self, WeightError> {
        Self::try_new(
            self.performance,
            self.price,
            self.consumption,
            self.temperature,
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("{} weight must be a finite, non-negative number (got {value})", .criterion.label())]
    Invalid { criterion: Criterion, value: f64 },
}

/// Named weight profile describing a use case such as gaming or office work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weights: WeightProfile,
}

/// A candidate paired with its score, rounded to [`SCORE_DECIMALS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn entry(&self) -> RankingEntry {
        RankingEntry {
            id: self.candidate.id.clone(),
            name: self.candidate.name.clone(),
            price: self.candidate.metrics.price,
            performance: self.candidate.metrics.performance,
            score: self.score,
            category: self.candidate.category,
        }
    }
}

/// Presentation row for a ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub id: CandidateId,
    pub name: String,
    pub price: f64,
    pub performance: f64,
    pub score: f64,
    pub category: MachineCategory,
}

/// Score of one candidate under the current and a proposed weight profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationEntry {
    pub candidate: Candidate,
    pub score_under_current: f64,
    pub score_under_proposed: f64,
    pub delta: f64,
}
