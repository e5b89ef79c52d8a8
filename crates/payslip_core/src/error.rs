//! Error taxonomy shared by resolver, registry and submission layers.
//!
//! # Responsibility
//! - Separate configuration faults (not retryable) from validation faults
//!   (caller can fix input and try again).
//!
//! # Invariants
//! - Validation failures never mutate editing state.
//! - Unknown sequence item ids are not errors; engine treats them as no-ops.

use crate::model::period::{FinancialYear, MonthName};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Errors caused by static plant/source configuration.
#[derive(Debug)]
pub enum ConfigurationError {
    /// Plant has no document source for the requested financial year.
    MissingSource {
        plant: String,
        financial_year: FinancialYear,
    },
    /// Plant name is not present in the registry.
    UnknownPlant(String),
    /// Registry declares the same plant twice.
    DuplicatePlant(String),
    /// Registry document could not be parsed into plant records.
    InvalidRegistry(String),
    /// Registry file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource {
                plant,
                financial_year,
            } => write!(f, "no source configured for {plant} / {financial_year}"),
            Self::UnknownPlant(name) => write!(f, "plant not configured: {name}"),
            Self::DuplicatePlant(name) => write!(f, "plant declared more than once: {name}"),
            Self::InvalidRegistry(message) => write!(f, "invalid plant registry: {message}"),
            Self::Io { path, source } => {
                write!(f, "failed to read plant registry `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors caused by incomplete or malformed caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Submission has no resolved periods.
    NoPeriods,
    /// Submission has no content items at all.
    NoContentItems,
    /// Submission has content but no template message item.
    MissingMessage,
    /// Month is current, future, or otherwise outside the selectable range.
    MonthNotSelectable {
        month: MonthName,
        financial_year: FinancialYear,
    },
    /// No plant was selected for a salary-slip job.
    NoPlantSelected,
    /// Single-slip job without an employee code.
    EmptyEmployeeCode,
    /// Recipient sheet id does not look like a spreadsheet id.
    InvalidSheetId(String),
    /// Neither email nor messaging delivery is enabled.
    NoDeliveryChannel,
    /// Report mailing without template files.
    NoTemplates,
    /// Template file type is not accepted for report mailing.
    UnsupportedTemplateType(String),
    /// Text is not one of the twelve month names.
    InvalidMonthName(String),
    /// Text is not a `YYYY-YY` financial year label.
    InvalidFinancialYear(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPeriods => write!(f, "at least one period must be selected"),
            Self::NoContentItems => write!(f, "submission has no content items"),
            Self::MissingMessage => write!(f, "submission requires exactly one template message"),
            Self::MonthNotSelectable {
                month,
                financial_year,
            } => write!(f, "{month} is not selectable in financial year {financial_year}"),
            Self::NoPlantSelected => write!(f, "a plant must be selected"),
            Self::EmptyEmployeeCode => write!(f, "employee code must not be blank"),
            Self::InvalidSheetId(value) => write!(f, "invalid spreadsheet id format: `{value}`"),
            Self::NoDeliveryChannel => {
                write!(f, "select at least one delivery channel (email or whatsapp)")
            }
            Self::NoTemplates => write!(f, "at least one template file is required"),
            Self::UnsupportedTemplateType(name) => {
                write!(f, "file type not supported: {name}; expected .txt or .docx")
            }
            Self::InvalidMonthName(value) => write!(f, "unknown month name: `{value}`"),
            Self::InvalidFinancialYear(value) => {
                write!(f, "invalid financial year label: `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}
