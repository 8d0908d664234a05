use crate::infra::{AppState, InMemoryCatalog};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use machine_advisor::advisor::{advisor_router, AdvisorService};
use machine_advisor::catalog::CatalogImporter;
use machine_advisor::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogImportRequest {
    #[serde(default)]
    pub(crate) candidates_csv: Option<String>,
    #[serde(default)]
    pub(crate) profiles_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogImportResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) candidates: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) profiles: Option<usize>,
    pub(crate) imported_at: DateTime<Utc>,
}

pub(crate) fn with_advisor_routes(
    service: Arc<AdvisorService<InMemoryCatalog>>,
    catalog: InMemoryCatalog,
) -> axum::Router {
    advisor_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog/import",
            axum::routing::post(catalog_import_endpoint),
        )
        .layer(Extension(catalog))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Replaces the catalog and/or profiles from CSV text. Both payloads are
/// parsed before either is swapped in.
pub(crate) async fn catalog_import_endpoint(
    Extension(catalog): Extension<InMemoryCatalog>,
    Json(payload): Json<CatalogImportRequest>,
) -> Result<Json<CatalogImportResponse>, AppError> {
    let CatalogImportRequest {
        candidates_csv,
        profiles_csv,
    } = payload;

    let candidates = candidates_csv
        .map(|csv| CatalogImporter::candidates_from_reader(Cursor::new(csv.into_bytes())))
        .transpose()?;
    let profiles = profiles_csv
        .map(|csv| CatalogImporter::profiles_from_reader(Cursor::new(csv.into_bytes())))
        .transpose()?;

    let response = CatalogImportResponse {
        candidates: candidates.as_ref().map(Vec::len),
        profiles: profiles.as_ref().map(Vec::len),
        imported_at: Utc::now(),
    };

    if let Some(candidates) = candidates {
        catalog.replace_candidates(candidates);
    }
    if let Some(profiles) = profiles {
        catalog.replace_profiles(profiles);
    }

    info!(
        candidates = ?response.candidates,
        profiles = ?response.profiles,
        imported_at = %response.imported_at,
        "catalog replaced from upload"
    );

    Ok(Json(response))
}
