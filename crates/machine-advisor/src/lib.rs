//! Catalog advisor ranking computer models against weighted usage profiles.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
