use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::advisor::{advisor_router, AdvisorService};
use crate::catalog::{CatalogError, CatalogStore};
use crate::engine::{
    BrandId, Candidate, CandidateId, ComparisonEngine, MachineCategory, MachineMetrics, ProfileId,
    UsageProfile, WeightProfile,
};

pub(super) fn machine(
    id: &str,
    name: &str,
    category: MachineCategory,
    brand: &str,
    metrics: [f64; 4],
) -> Candidate {
    let [performance, price, power_consumption, temperature] = metrics;
    Candidate {
        id: CandidateId(id.to_string()),
        name: name.to_string(),
        category,
        brand_id: Some(BrandId(brand.to_string())),
        metrics: MachineMetrics {
            performance,
            price,
            power_consumption,
            temperature,
        },
    }
}

pub(super) fn catalog() -> Vec<Candidate> {
    vec![
        machine("m-1", "Apex Tower", MachineCategory::Desktop, "apex", [100.0, 1000.0, 50.0, 60.0]),
        machine("m-2", "Breeze Mini", MachineCategory::Desktop, "breeze", [80.0, 500.0, 40.0, 50.0]),
        machine("m-3", "Apex Book", MachineCategory::Laptop, "apex", [70.0, 800.0, 30.0, 55.0]),
        machine("m-4", "Breeze Air", MachineCategory::Laptop, "breeze", [60.0, 650.0, 20.0, 45.0]),
    ]
}

pub(super) fn weights(weights: [f64; 4]) -> WeightProfile {
    let [performance, price, consumption, temperature] = weights;
    WeightProfile {
        performance,
        price,
        consumption,
        temperature,
    }
}

pub(super) fn profiles() -> Vec<UsageProfile> {
    vec![
        UsageProfile {
            id: ProfileId("balanced".to_string()),
            name: "Everyday".to_string(),
            description: "Even trade-offs".to_string(),
            weights: weights([0.25, 0.25, 0.25, 0.25]),
        },
        UsageProfile {
            id: ProfileId("budget".to_string()),
            name: "Student".to_string(),
            description: "Lowest price first".to_string(),
            weights: weights([0.1, 0.6, 0.2, 0.1]),
        },
        UsageProfile {
            id: ProfileId("gaming".to_string()),
            name: "Gaming".to_string(),
            description: String::new(),
            weights: weights([0.7, 0.1, 0.1, 0.1]),
        },
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    pub(super) candidates: Arc<Mutex<Vec<Candidate>>>,
    pub(super) profiles: Arc<Mutex<Vec<UsageProfile>>>,
}

impl MemoryCatalog {
    pub(super) fn seeded() -> Self {
        Self {
            candidates: Arc::new(Mutex::new(catalog())),
            profiles: Arc::new(Mutex::new(profiles())),
        }
    }

    pub(super) fn with_profiles_only() -> Self {
        Self {
            candidates: Arc::new(Mutex::new(Vec::new())),
            profiles: Arc::new(Mutex::new(profiles())),
        }
    }
}

impl CatalogStore for MemoryCatalog {
    fn candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        Ok(self.candidates.lock().expect("catalog mutex poisoned").clone())
    }

    fn profiles(&self) -> Result<Vec<UsageProfile>, CatalogError> {
        Ok(self.profiles.lock().expect("catalog mutex poisoned").clone())
    }

    fn profile(&self, id: &ProfileId) -> Result<Option<UsageProfile>, CatalogError> {
        let guard = self.profiles.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|profile| &profile.id == id).cloned())
    }

    fn update_weights(&self, id: &ProfileId, weights: WeightProfile) -> Result<(), CatalogError> {
        let mut guard = self.profiles.lock().expect("catalog mutex poisoned");
        let profile = guard
            .iter_mut()
            .find(|profile| &profile.id == id)
            .ok_or(CatalogError::NotFound)?;
        profile.weights = weights;
        Ok(())
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogStore for UnavailableCatalog {
    fn candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }

    fn profiles(&self) -> Result<Vec<UsageProfile>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }

    fn profile(&self, _id: &ProfileId) -> Result<Option<UsageProfile>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }

    fn update_weights(&self, _id: &ProfileId, _weights: WeightProfile) -> Result<(), CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (AdvisorService<MemoryCatalog>, MemoryCatalog) {
    let store = MemoryCatalog::seeded();
    let service = AdvisorService::new(Arc::new(store.clone()), ComparisonEngine::default());
    (service, store)
}

pub(super) fn router_with_store(store: MemoryCatalog) -> axum::Router {
    advisor_router(Arc::new(AdvisorService::new(
        Arc::new(store),
        ComparisonEngine::default(),
    )))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
