//! Catalog import and storage seams consumed by the advisor service.

mod importer;
pub mod repository;

pub use importer::{CatalogImporter, ImportError};
pub use repository::{CatalogError, CatalogStore};
