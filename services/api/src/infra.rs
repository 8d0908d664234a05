use machine_advisor::catalog::{CatalogError, CatalogImporter, CatalogStore, ImportError};
use machine_advisor::config::AdvisorConfig;
use machine_advisor::engine::{
    BrandId, Candidate, CandidateId, MachineCategory, MachineMetrics, ProfileId, UsageProfile,
    WeightProfile,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local catalog store backing the service and CLI reports.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalog {
    candidates: Arc<Mutex<Vec<Candidate>>>,
    profiles: Arc<Mutex<Vec<UsageProfile>>>,
}

impl InMemoryCatalog {
    pub(crate) fn new(candidates: Vec<Candidate>, profiles: Vec<UsageProfile>) -> Self {
        Self {
            candidates: Arc::new(Mutex::new(candidates)),
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }

    pub(crate) fn replace_candidates(&self, candidates: Vec<Candidate>) {
        *self.candidates.lock().expect("catalog mutex poisoned") = candidates;
    }

    pub(crate) fn replace_profiles(&self, profiles: Vec<UsageProfile>) {
        *self.profiles.lock().expect("catalog mutex poisoned") = profiles;
    }
}

impl CatalogStore for InMemoryCatalog {
    fn candidates(&self) -> Result<Vec<Candidate>, CatalogError> {
        let guard = self.candidates.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn profiles(&self) -> Result<Vec<UsageProfile>, CatalogError> {
        let guard = self.profiles.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn profile(&self, id: &ProfileId) -> Result<Option<UsageProfile>, CatalogError> {
        let guard = self.profiles.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|profile| &profile.id == id).cloned())
    }

    fn update_weights(&self, id: &ProfileId, weights: WeightProfile) -> Result<(), CatalogError> {
        let mut guard = self.profiles.lock().expect("catalog mutex poisoned");
        match guard.iter_mut().find(|profile| &profile.id == id) {
            Some(profile) => {
                profile.weights = weights;
                Ok(())
            }
            None => Err(CatalogError::NotFound),
        }
    }
}

/// Builds the store from configured CSV files, falling back to the sample catalog.
pub(crate) fn seed_catalog(config: &AdvisorConfig) -> Result<InMemoryCatalog, ImportError> {
    let candidates = match &config.catalog_csv {
        Some(path) => {
            let candidates = CatalogImporter::candidates_from_path(path)?;
            info!(path = %path.display(), count = candidates.len(), "catalog imported");
            candidates
        }
        None => sample_candidates(),
    };

    let profiles = match &config.profiles_csv {
        Some(path) => {
            let profiles = CatalogImporter::profiles_from_path(path)?;
            info!(path = %path.display(), count = profiles.len(), "profiles imported");
            profiles
        }
        None => sample_profiles(),
    };

    Ok(InMemoryCatalog::new(candidates, profiles))
}

pub(crate) fn sample_candidates() -> Vec<Candidate> {
    let machine = |id: &str, name: &str, category, brand: &str, metrics: [f64; 4]| {
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
    };

    vec![
        machine("pc-forge", "Forge X9", MachineCategory::Desktop, "acme", [98.0, 1850.0, 420.0, 72.0]),
        machine("pc-tower", "Tower Pro", MachineCategory::Desktop, "zenith", [86.0, 1240.0, 310.0, 64.0]),
        machine("pc-mini", "Mini Cube", MachineCategory::Desktop, "acme", [64.0, 690.0, 95.0, 52.0]),
        machine("lt-aero", "Aero 14", MachineCategory::Laptop, "zenith", [78.0, 1390.0, 65.0, 58.0]),
        machine("lt-slim", "Slimbook 13", MachineCategory::Laptop, "nordic", [58.0, 720.0, 28.0, 44.0]),
    ]
}

pub(crate) fn sample_profiles() -> Vec<UsageProfile> {
    let profile = |id: &str, name: &str, description: &str, weights: [f64; 4]| {
        let [performance, price, consumption, temperature] = weights;
        UsageProfile {
            id: ProfileId(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            weights: WeightProfile {
                performance,
                price,
                consumption,
                temperature,
            },
        }
    };

    vec![
        profile("gaming", "Gaming", "High frame rates and heavy workloads", [0.6, 0.2, 0.1, 0.1]),
        profile("student", "Student", "Affordable machines for coursework", [0.15, 0.55, 0.15, 0.15]),
        profile("office", "Office", "Quiet and efficient desks", [0.2, 0.2, 0.35, 0.25]),
    ]
}
