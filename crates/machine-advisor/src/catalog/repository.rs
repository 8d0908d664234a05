use crate::engine::{BrandId, Candidate, ProfileId, UsageProfile, WeightProfile};

/// Storage abstraction for the machine catalog and usage profiles.
pub trait CatalogStore: Send + Sync {
    fn candidates(&self) -> Result<Vec<Candidate>, CatalogError>;
    fn profiles(&self) -> Result<Vec<UsageProfile>, CatalogError>;
    fn profile(&self, id: &ProfileId) -> Result<Option<UsageProfile>, CatalogError>;
    fn update_weights(&self, id: &ProfileId, weights: WeightProfile) -> Result<(), CatalogError>;

    /// Distinct brands present in the catalog, sorted.
    fn brands(&self) -> Result<Vec<BrandId>, CatalogError> {
        let mut brands: Vec<BrandId> = self
            .candidates()?
            .into_iter()
            .filter_map(|candidate| candidate.brand_id)
            .collect();
        brands.sort();
        brands.dedup();
        Ok(brands)
    }
}

/// Error enumeration for catalog store failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("record not found")]
    NotFound,
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
