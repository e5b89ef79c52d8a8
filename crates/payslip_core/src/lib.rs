//! Core domain logic for payroll slip dispatch.
//! This crate is the single source of truth for period and sequencing invariants.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;

pub use config::backend::BackendConfig;
pub use config::plant_registry::PlantRegistry;
pub use error::{ConfigurationError, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::payload::Payload;
pub use model::period::{FinancialYear, MonthName, PeriodSelection, ResolvedPeriod};
pub use model::plant::PlantConfig;
pub use model::sequence_item::{ItemId, ItemKind, PayloadRef, SequenceItem};
pub use service::period_resolver::{
    check_selectable, default_previous_period, financial_year_of, first_available_month,
    list_available_months, list_financial_years, resolve_document_source, DEFAULT_START_YEAR,
};
pub use service::report_mailing::{is_valid_sheet_id, ReportMailingRequest};
pub use service::sequence_engine::{SequenceEngine, SequenceState};
pub use service::submission::{
    PeriodStatus, PeriodStatusKind, SubmissionOutcome, SubmissionService, SubmissionTransport,
    TransportError,
};
pub use service::submission_draft::{
    AttachmentSlot, DeliveryChannels, DraftError, SubmissionDraft, SubmissionMode, SubmissionRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
