use crate::engine::{
    parse_non_negative_real, BrandId, Candidate, CandidateId, MachineCategory, MachineMetrics,
    ProfileId, UsageProfile, WeightProfile,
};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads catalog machines and usage profiles from CSV exports.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn candidates_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, ImportError> {
        let file = File::open(path)?;
        Self::candidates_from_reader(file)
    }

    pub fn candidates_from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut candidates = Vec::new();

        for (index, record) in csv_reader.deserialize::<CandidateRow>().enumerate() {
            let row = record?;
            let category =
                MachineCategory::parse(&row.category).ok_or_else(|| ImportError::UnknownCategory {
                    line: index + 2,
                    value: row.category.clone(),
                })?;

            candidates.push(Candidate {
                id: CandidateId(row.id),
                name: row.name,
                category,
                brand_id: row.brand_id.map(BrandId),
                metrics: MachineMetrics {
                    performance: parse_non_negative_real(&row.performance),
                    price: parse_non_negative_real(&row.price),
                    power_consumption: parse_non_negative_real(&row.power_consumption),
                    temperature: parse_non_negative_real(&row.temperature),
                },
            });
        }

        Ok(candidates)
    }

    pub fn profiles_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<UsageProfile>, ImportError> {
        let file = File::open(path)?;
        Self::profiles_from_reader(file)
    }

    pub fn profiles_from_reader<R: Read>(reader: R) -> Result<Vec<UsageProfile>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut profiles = Vec::new();

        for record in csv_reader.deserialize::<ProfileRow>() {
            let row = record?;
            profiles.push(UsageProfile {
                id: ProfileId(row.id),
                name: row.name,
                description: row.description.unwrap_or_default(),
                weights: WeightProfile {
                    performance: parse_non_negative_real(&row.performance),
                    price: parse_non_negative_real(&row.price),
                    consumption: parse_non_negative_real(&row.consumption),
                    temperature: parse_non_negative_real(&row.temperature),
                },
            });
        }

        Ok(profiles)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unknown machine category '{value}'")]
    UnknownCategory { line: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    id: String,
    name: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    brand_id: Option<String>,
    #[serde(default)]
    performance: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    power_consumption: String,
    #[serde(default)]
    temperature: String,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default)]
    performance: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    consumption: String,
    #[serde(default)]
    temperature: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
