//! In-process plant registry.
//!
//! # Responsibility
//! - Load plant source configuration once at startup (JSON or built-in).
//! - Serve total-or-error lookups by plant name.
//!
//! # Invariants
//! - Plant names are unique after trimming.
//! - The registry is read-only after construction.

use crate::error::ConfigurationError;
use crate::model::period::{FinancialYear, PeriodSelection, ResolvedPeriod};
use crate::model::plant::PlantConfig;
use crate::service::period_resolver::resolve_document_source;
use log::info;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// On-disk shape of one plant record.
#[derive(Debug, Deserialize)]
struct PlantRecord {
    name: String,
    drive_id: String,
    /// Keyed by financial-year label (`2024-25` or `2024_25`).
    #[serde(default)]
    document_sources: BTreeMap<String, String>,
}

/// Read-only lookup of plant configurations.
#[derive(Debug, Clone, Default)]
pub struct PlantRegistry {
    plants: Vec<PlantConfig>,
}

impl PlantRegistry {
    /// Builds a registry, rejecting blank or duplicate names.
    pub fn new(plants: Vec<PlantConfig>) -> Result<Self, ConfigurationError> {
        let mut registry = Self::default();
        for plant in plants {
            if plant.name().is_empty() {
                return Err(ConfigurationError::InvalidRegistry(
                    "plant name must not be blank".to_string(),
                ));
            }
            if registry.get(plant.name()).is_some() {
                return Err(ConfigurationError::DuplicatePlant(plant.name().to_string()));
            }
            registry.plants.push(plant);
        }
        Ok(registry)
    }

    /// Parses a JSON array of plant records.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        let records: Vec<PlantRecord> = serde_json::from_str(raw)
            .map_err(|err| ConfigurationError::InvalidRegistry(err.to_string()))?;

        let mut plants = Vec::with_capacity(records.len());
        for record in records {
            let mut plant = PlantConfig::new(record.name, record.drive_id);
            let mut seen_years = BTreeSet::new();
            for (key, source_id) in record.document_sources {
                let financial_year: FinancialYear = key.parse().map_err(|_| {
                    ConfigurationError::InvalidRegistry(format!(
                        "plant `{}` has malformed financial year key `{key}`",
                        plant.name()
                    ))
                })?;
                // `2024-25` and `2024_25` name the same year.
                if !seen_years.insert(financial_year) {
                    return Err(ConfigurationError::InvalidRegistry(format!(
                        "plant `{}` declares financial year `{financial_year}` more than once",
                        plant.name()
                    )));
                }
                plant = plant.with_document_source(financial_year, source_id);
            }
            plants.push(plant);
        }

        let registry = Self::new(plants)?;
        info!(
            "event=registry_load module=config status=ok source=json plants={}",
            registry.len()
        );
        Ok(registry)
    }

    /// Reads and parses a registry file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Plants shipped with the deployed front-end.
    pub fn builtin() -> Self {
        let fy_2024 = FinancialYear::new(2024);
        let fy_2025 = FinancialYear::new(2025);
        Self {
            plants: vec![
                PlantConfig::new("Head Office", "1otjV4dGQQUKq-AKQDwgxClW1pPY7pZl99QscxixQUsA"),
                PlantConfig::new("Gulbarga", "1DmV91n5ryeAJ7t4xM4jMzv99X5f5wbtf_1LsCOOBj8Q")
                    .with_document_source(fy_2024, "1HUUF8g3GJ3ZaPyUsRhRgCURu5m0prtZRy7kEIZoc10M"),
                PlantConfig::new("Kerur", "1-rkSly48tCMVC0oH8OojmmQcg_0bspwuFNWD6KsqdBc"),
                PlantConfig::new("Humnabad", "1gAHUISFRUvxoskWia9WLoJw-UGzyH_TFO8yDZ9ifqMc")
                    .with_document_source(fy_2024, "15ouV8H0JGCHD1CTeVaQgOgIODMsI6dXolRyEJOju53U"),
                PlantConfig::new("Omkar", "1lnLmWcQ0RalUdCw19KK64JjpewVzMcMjLF9NoN-LRTo")
                    .with_document_source(fy_2024, "1qCmbnZpgtGrN6M0J3KFWi6p3-mKKT1xctjyZgmIN0J0")
                    .with_document_source(fy_2025, "1PfX_m8MXmfu94zlT6xjzIHFIfYjYhTPzyXjKnoXYslI"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Plant names in declaration order.
    pub fn plant_names(&self) -> Vec<&str> {
        self.plants.iter().map(PlantConfig::name).collect()
    }

    /// Returns one plant by trimmed name.
    pub fn get(&self, name: &str) -> Option<&PlantConfig> {
        let normalized = name.trim();
        self.plants.iter().find(|plant| plant.name() == normalized)
    }

    /// Returns one plant or `UnknownPlant`.
    pub fn require(&self, name: &str) -> Result<&PlantConfig, ConfigurationError> {
        self.get(name)
            .ok_or_else(|| ConfigurationError::UnknownPlant(name.trim().to_string()))
    }

    /// Looks up `plant_name` and resolves `selection` against it.
    pub fn resolve(
        &self,
        plant_name: &str,
        selection: &PeriodSelection,
    ) -> Result<ResolvedPeriod, ConfigurationError> {
        resolve_document_source(self.require(plant_name)?, selection)
    }
}
