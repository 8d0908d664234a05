use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CatalogError, CatalogStore};
use crate::engine::{
    BrandId, Candidate, CandidateFilter, CandidateId, ComparisonEngine, Criterion,
    MachineCategory, NarrativeStrategy, ProfileId, RankingEntry, UsageProfile, WeightError,
    WeightProfile,
};

/// Shown alongside an empty calibration table.
pub const EMPTY_CATALOG_WARNING: &str = "Add models to the catalog before calibrating profiles.";

/// Brand label for models without a brand.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Service resolving profiles and filters before handing data to the engine.
pub struct AdvisorService<S> {
    store: Arc<S>,
    engine: ComparisonEngine,
}

/// Filters accepted by a recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendationQuery {
    pub profile_id: ProfileId,
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub category: Option<MachineCategory>,
}

impl RecommendationQuery {
    pub fn filters(&self) -> Vec<CandidateFilter> {
        let mut filters = Vec::new();
        if let Some(brand) = &self.brand_id {
            filters.push(CandidateFilter::Brand(brand.clone()));
        }
        if let Some(category) = self.category {
            filters.push(CandidateFilter::Category(category));
        }
        filters
    }
}

/// Recommendation payload returned to API and CLI callers.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub top3: Vec<RankingEntry>,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<NarrativeStrategy>,
    /// Absent when another criterion ties for the largest weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_criterion: Option<Criterion>,
    pub evaluated_candidates: usize,
    pub evaluated_at: DateTime<Utc>,
}

/// One row of a calibration table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationRow {
    pub candidate_id: CandidateId,
    pub name: String,
    pub category: MachineCategory,
    pub score_under_current: f64,
    pub score_under_proposed: f64,
    pub delta: f64,
}

/// What-if comparison of a stored profile against proposed weights.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub current: WeightProfile,
    pub proposed: WeightProfile,
    pub applied: bool,
    pub rows: Vec<CalibrationRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Catalog row as listed to users, with a display brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelListing {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub brand: String,
}

impl From<Candidate> for ModelListing {
    fn from(candidate: Candidate) -> Self {
        let brand = candidate
            .brand_id
            .as_ref()
            .map(|brand| brand.0.clone())
            .unwrap_or_else(|| UNKNOWN_BRAND.to_string());
        Self { candidate, brand }
    }
}

/// Model with the highest performance per unit of price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestValue {
    pub id: CandidateId,
    pub name: String,
    pub performance_per_price: f64,
}

/// Counts shown on the catalog dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub models: usize,
    pub profiles: usize,
    pub brands: usize,
    pub best_value: Option<BestValue>,
}

/// Best performance/price ratio, skipping unpriced models. The first model
/// wins ties.
pub fn best_value(candidates: &[Candidate]) -> Option<BestValue> {
    let mut best: Option<BestValue> = None;
    for candidate in candidates {
        let price = candidate.metrics.price;
        if price <= 0.0 {
            continue;
        }
        let ratio = candidate.metrics.performance / price;
        if best
            .as_ref()
            .map_or(true, |current| ratio > current.performance_per_price)
        {
            best = Some(BestValue {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                performance_per_price: ratio,
            });
        }
    }
    best
}

impl<S> AdvisorService<S>
where
    S: CatalogStore + 'static,
{
    pub fn new(store: Arc<S>, engine: ComparisonEngine) -> Self {
        Self { store, engine }
    }

    pub fn profiles(&self) -> Result<Vec<UsageProfile>, AdvisorError> {
        Ok(self.store.profiles()?)
    }

    pub fn brands(&self) -> Result<Vec<BrandId>, AdvisorError> {
        Ok(self.store.brands()?)
    }

    /// Catalog models, optionally narrowed to names containing `search`
    /// (case-insensitive). A blank search lists everything.
    pub fn models(&self, search: Option<&str>) -> Result<Vec<ModelListing>, AdvisorError> {
        let needle = search
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        let listings: Vec<ModelListing> = self
            .store
            .candidates()?
            .into_iter()
            .filter(|candidate| match &needle {
                Some(needle) => candidate.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .map(ModelListing::from)
            .collect();

        debug!(search = ?needle, matches = listings.len(), "catalog models listed");
        Ok(listings)
    }

    pub fn catalog_summary(&self) -> Result<CatalogSummary, AdvisorError> {
        let candidates = self.store.candidates()?;
        Ok(CatalogSummary {
            models: candidates.len(),
            profiles: self.store.profiles()?.len(),
            brands: self.store.brands()?.len(),
            best_value: best_value(&candidates),
        })
    }

    /// Rank the catalog for a stored profile, honoring optional filters.
    pub fn recommend(&self, query: &RecommendationQuery) -> Result<Recommendation, AdvisorError> {
        let profile = self.resolve_profile(&query.profile_id)?;
        let candidates = self.store.candidates()?;
        let filters = query.filters();

        let result = self.engine.compare(&candidates, &profile, &filters);

        info!(
            profile = %profile.id,
            catalog = candidates.len(),
            evaluated = result.evaluated,
            strategy = ?result.strategy,
            "recommendation computed"
        );

        Ok(Recommendation {
            top3: result.entries(),
            recommendation: result.narrative,
            strategy: result.strategy,
            dominant_criterion: result
                .dominance
                .filter(|dominance| !dominance.contested)
                .map(|dominance| dominance.criterion),
            evaluated_candidates: result.evaluated,
            profile_id: profile.id,
            profile_name: profile.name,
            evaluated_at: Utc::now(),
        })
    }

    /// Compare stored weights with proposed ones across the whole catalog,
    /// optionally saving the proposal.
    pub fn calibrate(
        &self,
        profile_id: &ProfileId,
        proposed: WeightProfile,
        apply: bool,
    ) -> Result<CalibrationReport, AdvisorError> {
        let proposed = proposed.validate()?;
        let profile = self.resolve_profile(profile_id)?;
        let candidates = self.store.candidates()?;

        let rows: Vec<CalibrationRow> = self
            .engine
            .calibrate(&candidates, &profile.weights, &proposed)
            .into_iter()
            .map(|entry| CalibrationRow {
                candidate_id: entry.candidate.id,
                name: entry.candidate.name,
                category: entry.candidate.category,
                score_under_current: entry.score_under_current,
                score_under_proposed: entry.score_under_proposed,
                delta: entry.delta,
            })
            .collect();

        let message = rows
            .is_empty()
            .then(|| EMPTY_CATALOG_WARNING.to_string());

        if apply {
            self.store.update_weights(&profile.id, proposed)?;
            info!(profile = %profile.id, "profile weights updated from calibration");
        } else {
            debug!(profile = %profile.id, rows = rows.len(), "calibration preview computed");
        }

        Ok(CalibrationReport {
            profile_id: profile.id,
            profile_name: profile.name,
            current: profile.weights,
            proposed,
            applied: apply,
            rows,
            message,
        })
    }

    fn resolve_profile(&self, id: &ProfileId) -> Result<UsageProfile, AdvisorError> {
        self.store
            .profile(id)?
            .ok_or_else(|| AdvisorError::ProfileNotFound(id.clone()))
    }
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("usage profile '{0}' not found")]
    ProfileNotFound(ProfileId),
    #[error(transparent)]
    InvalidWeights(#[from] WeightError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
