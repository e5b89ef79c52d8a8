//! Per-plant document source configuration.
//!
//! # Invariants
//! - A plant maps each financial year to at most one document source id.
//! - Blank ids are treated as "not configured" and never stored.

use crate::model::period::FinancialYear;
use std::collections::BTreeMap;

/// Static configuration for one plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantConfig {
    name: String,
    drive_id: String,
    document_sources: BTreeMap<FinancialYear, String>,
}

impl PlantConfig {
    /// Creates a plant with no financial years configured yet.
    pub fn new(name: impl Into<String>, drive_id: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            drive_id: drive_id.into().trim().to_string(),
            document_sources: BTreeMap::new(),
        }
    }

    /// Registers the document source for one financial year.
    ///
    /// A blank `source_id` leaves the year unconfigured.
    pub fn with_document_source(
        mut self,
        financial_year: FinancialYear,
        source_id: impl Into<String>,
    ) -> Self {
        let source_id = source_id.into();
        let trimmed = source_id.trim();
        if !trimmed.is_empty() {
            self.document_sources
                .insert(financial_year, trimmed.to_string());
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn drive_id(&self) -> &str {
        &self.drive_id
    }

    /// Returns the source id for `financial_year`, if configured.
    pub fn document_source(&self, financial_year: FinancialYear) -> Option<&str> {
        self.document_sources
            .get(&financial_year)
            .map(String::as_str)
    }

    /// Configured financial years, ascending.
    pub fn configured_years(&self) -> Vec<FinancialYear> {
        self.document_sources.keys().copied().collect()
    }
}
