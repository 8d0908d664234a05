//! Advisor service and HTTP surface around the decision engine.
//!
//! The service is the caller the engine expects: it resolves usage profiles
//! from the catalog store, refuses to run without one, and turns filters
//! from the request into engine filters.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::advisor_router;
pub use service::{
    best_value, AdvisorError, AdvisorService, BestValue, CalibrationReport, CalibrationRow,
    CatalogSummary, ModelListing, Recommendation, RecommendationQuery, EMPTY_CATALOG_WARNING,
    UNKNOWN_BRAND,
};
