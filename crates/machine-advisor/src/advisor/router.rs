use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{AdvisorError, AdvisorService, RecommendationQuery};
use crate::catalog::CatalogStore;
use crate::engine::{BrandId, MachineCategory, ProfileId, WeightProfile};

/// Router builder exposing recommendation and calibration endpoints.
pub fn advisor_router<S>(service: Arc<AdvisorService<S>>) -> Router
where
    S: CatalogStore + 'static,
{
    Router::new()
        .route("/api/v1/profiles", get(profiles_handler::<S>))
        .route("/api/v1/brands", get(brands_handler::<S>))
        .route("/api/v1/models", get(models_handler::<S>))
        .route("/api/v1/catalog/summary", get(summary_handler::<S>))
        .route("/api/v1/recommendations", post(recommend_handler::<S>))
        .route(
            "/api/v1/profiles/:profile_id/calibration",
            post(calibration_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    pub(crate) profile_id: Option<ProfileId>,
    #[serde(default)]
    pub(crate) brand_id: Option<BrandId>,
    #[serde(default)]
    pub(crate) category: Option<MachineCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ModelSearch {
    #[serde(default)]
    pub(crate) q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalibrationRequest {
    pub(crate) weights: ProposedWeights,
    #[serde(default)]
    pub(crate) apply: bool,
}

/// Operator-entered weights; unlike stored profiles these must be numbers.
#[derive(Debug, Deserialize)]
pub(crate) struct ProposedWeights {
    pub(crate) performance: f64,
    pub(crate) price: f64,
    pub(crate) consumption: f64,
    pub(crate) temperature: f64,
}

impl From<ProposedWeights> for WeightProfile {
    fn from(value: ProposedWeights) -> Self {
        Self {
            performance: value.performance,
            price: value.price,
            consumption: value.consumption,
            temperature: value.temperature,
        }
    }
}

pub(crate) async fn profiles_handler<S>(State(service): State<Arc<AdvisorService<S>>>) -> Response
where
    S: CatalogStore + 'static,
{
    match service.profiles() {
        Ok(profiles) => (StatusCode::OK, axum::Json(json!({ "profiles": profiles }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn brands_handler<S>(State(service): State<Arc<AdvisorService<S>>>) -> Response
where
    S: CatalogStore + 'static,
{
    match service.brands() {
        Ok(brands) => (StatusCode::OK, axum::Json(json!({ "brands": brands }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn models_handler<S>(
    State(service): State<Arc<AdvisorService<S>>>,
    Query(search): Query<ModelSearch>,
) -> Response
where
    S: CatalogStore + 'static,
{
    match service.models(search.q.as_deref()) {
        Ok(models) => (StatusCode::OK, axum::Json(json!({ "models": models }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<S>(State(service): State<Arc<AdvisorService<S>>>) -> Response
where
    S: CatalogStore + 'static,
{
    match service.catalog_summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommend_handler<S>(
    State(service): State<Arc<AdvisorService<S>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    S: CatalogStore + 'static,
{
    let Some(profile_id) = request.profile_id.filter(|id| !id.0.trim().is_empty()) else {
        let payload = json!({ "error": "select a usage profile" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let query = RecommendationQuery {
        profile_id,
        brand_id: request.brand_id.filter(|brand| !brand.0.trim().is_empty()),
        category: request.category,
    };

    match service.recommend(&query) {
        Ok(recommendation) => (StatusCode::OK, axum::Json(recommendation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn calibration_handler<S>(
    State(service): State<Arc<AdvisorService<S>>>,
    Path(profile_id): Path<String>,
    axum::Json(request): axum::Json<CalibrationRequest>,
) -> Response
where
    S: CatalogStore + 'static,
{
    let id = ProfileId(profile_id);
    match service.calibrate(&id, request.weights.into(), request.apply) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AdvisorError) -> Response {
    let status = match &error {
        AdvisorError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        AdvisorError::InvalidWeights(_) => StatusCode::BAD_REQUEST,
        AdvisorError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
