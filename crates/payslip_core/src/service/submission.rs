//! Submission transport boundary.
//!
//! # Responsibility
//! - Define the contract the networking collaborator implements.
//! - Forward one validated request exactly once and report the outcome as-is.
//!
//! # Invariants
//! - No retry state lives in core; a failed call is returned unchanged.
//! - The backend location is injected, never read from global state.

use crate::config::backend::{BackendConfig, ENDPOINT_UPLOAD_REPORT};
use crate::error::ValidationError;
use crate::service::report_mailing::ReportMailingRequest;
use crate::service::submission_draft::SubmissionRequest;
use log::{error, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-period generation result reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatusKind {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// Human-readable status for one month of a job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeriodStatus {
    pub month: String,
    pub year: String,
    pub status: PeriodStatusKind,
    #[serde(default)]
    pub message: String,
}

/// Response body of a successful transport call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub results: Vec<PeriodStatus>,
}

impl SubmissionOutcome {
    /// Periods the remote service did not report as successful.
    pub fn failed_periods(&self) -> impl Iterator<Item = &PeriodStatus> {
        self.results
            .iter()
            .filter(|result| result.status != PeriodStatusKind::Success)
    }
}

/// Errors from submission calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request was rejected before reaching the transport.
    Rejected(ValidationError),
    /// Transport or remote service failure, message passed through verbatim.
    Failed(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Failed(_) => None,
        }
    }
}

/// Contract implemented by the networking collaborator.
pub trait SubmissionTransport {
    /// Sends one slip generation request to `url`.
    fn send_slips(
        &self,
        url: &str,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, TransportError>;

    /// Sends one report mailing request to `url`.
    fn send_report_mailing(
        &self,
        url: &str,
        request: &ReportMailingRequest,
    ) -> Result<SubmissionOutcome, TransportError>;
}

/// Forwards validated requests to a transport.
pub struct SubmissionService<T: SubmissionTransport> {
    backend: BackendConfig,
    transport: T,
}

impl<T: SubmissionTransport> SubmissionService<T> {
    pub fn new(backend: BackendConfig, transport: T) -> Self {
        Self { backend, transport }
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits one slip job. Called once per user action; never retried here.
    pub fn submit_slips(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, TransportError> {
        let url = self.backend.api_url(request.endpoint);
        info!(
            "event=submit_slips module=submission status=start endpoint={} periods={}",
            request.endpoint,
            request.payload.periods().len()
        );
        let result = self.transport.send_slips(&url, request);
        log_outcome("submit_slips", &result);
        result
    }

    /// Validates and submits one report mailing run.
    pub fn submit_report_mailing(
        &self,
        request: &ReportMailingRequest,
    ) -> Result<SubmissionOutcome, TransportError> {
        request.validate().map_err(TransportError::Rejected)?;
        let url = self.backend.api_url(ENDPOINT_UPLOAD_REPORT);
        info!(
            "event=submit_report module=submission status=start templates={}",
            request.templates.len()
        );
        let result = self.transport.send_report_mailing(&url, request);
        log_outcome("submit_report", &result);
        result
    }
}

fn log_outcome(event: &str, result: &Result<SubmissionOutcome, TransportError>) {
    match result {
        Ok(outcome) => info!(
            "event={} module=submission status=ok results={} failed={}",
            event,
            outcome.results.len(),
            outcome.failed_periods().count()
        ),
        Err(err) => error!(
            "event={} module=submission status=error error={}",
            event, err
        ),
    }
}
