//! Salary-slip submission drafting.
//!
//! # Responsibility
//! - Hold one editing session: plant, period selections, channels, content.
//! - Turn a complete draft into a `SubmissionRequest` for the transport.
//!
//! # Invariants
//! - The draft always holds at least one period selection.
//! - The attachment order is a permutation of the selections; any change to
//!   the selections resets it to selection order.
//! - Resolution failures surface per selection before payload assembly.
//! - `build` never mutates the draft.

use crate::config::backend::{ENDPOINT_BATCH_SLIPS, ENDPOINT_SINGLE_SLIP};
use crate::config::plant_registry::PlantRegistry;
use crate::error::{ConfigurationError, ValidationError};
use crate::model::payload::Payload;
use crate::model::period::{year_text, MonthName, PeriodSelection, ResolvedPeriod};
use crate::service::period_resolver::{check_selectable, default_previous_period};
use crate::service::sequence_engine::SequenceEngine;
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Target of a salary-slip job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionMode {
    /// One employee, possibly several months.
    Single { employee_code: String },
    /// Every employee of the plant.
    Batch,
}

impl SubmissionMode {
    /// Remote endpoint name for this mode.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Single { .. } => ENDPOINT_SINGLE_SLIP,
            Self::Batch => ENDPOINT_BATCH_SLIPS,
        }
    }
}

/// Delivery channel switches sent with every job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryChannels {
    #[serde(rename = "send_email")]
    pub email: bool,
    #[serde(rename = "send_whatsapp")]
    pub whatsapp: bool,
}

impl DeliveryChannels {
    pub fn any(&self) -> bool {
        self.email || self.whatsapp
    }
}

/// One entry of the period attachment order.
///
/// `year` is the start year of the selected financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttachmentSlot {
    pub month: MonthName,
    #[serde(with = "year_text")]
    pub year: i32,
}

impl From<&PeriodSelection> for AttachmentSlot {
    fn from(selection: &PeriodSelection) -> Self {
        Self {
            month: selection.month,
            year: selection.financial_year.start_year(),
        }
    }
}

/// Complete request handed to the submission transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    #[serde(skip)]
    pub endpoint: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    pub plant: String,
    #[serde(flatten)]
    pub channels: DeliveryChannels,
    /// Order in which per-period slips are attached.
    pub attachment_sequence: Vec<AttachmentSlot>,
    #[serde(flatten)]
    pub payload: Payload,
}

/// Errors from `SubmissionDraft::build`.
#[derive(Debug)]
pub enum DraftError {
    Configuration(ConfigurationError),
    Validation(ValidationError),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DraftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for DraftError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

impl From<ValidationError> for DraftError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One salary-slip editing session.
#[derive(Debug, Clone)]
pub struct SubmissionDraft {
    mode: SubmissionMode,
    plant: Option<String>,
    selections: Vec<PeriodSelection>,
    /// Indices into `selections`, in attachment order.
    attachment_order: Vec<usize>,
    channels: DeliveryChannels,
    sequence: SequenceEngine,
}

impl SubmissionDraft {
    /// Starts a draft seeded with the period before `reference_date`.
    pub fn new(mode: SubmissionMode, reference_date: NaiveDate) -> Self {
        Self {
            mode,
            plant: None,
            selections: vec![default_previous_period(reference_date)],
            attachment_order: vec![0],
            channels: DeliveryChannels::default(),
            sequence: SequenceEngine::new(),
        }
    }

    pub fn mode(&self) -> &SubmissionMode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: SubmissionMode) {
        self.mode = mode;
    }

    pub fn plant(&self) -> Option<&str> {
        self.plant.as_deref()
    }

    /// Selects the plant; blank input clears the selection.
    pub fn select_plant(&mut self, name: &str) {
        let trimmed = name.trim();
        self.plant = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn selections(&self) -> &[PeriodSelection] {
        &self.selections
    }

    /// Appends another period selection.
    pub fn add_period(&mut self, selection: PeriodSelection) {
        self.selections.push(selection);
        self.reset_attachment_order();
    }

    /// Replaces the selection at `index`. Returns `false` when out of range.
    pub fn update_period(&mut self, index: usize, selection: PeriodSelection) -> bool {
        match self.selections.get_mut(index) {
            Some(slot) => {
                *slot = selection;
                self.reset_attachment_order();
                true
            }
            None => false,
        }
    }

    /// Removes the selection at `index`.
    ///
    /// The first selection is the primary period and can't be removed.
    /// Returns `false` when nothing was removed.
    pub fn remove_period(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.selections.len() {
            return false;
        }
        self.selections.remove(index);
        self.reset_attachment_order();
        true
    }

    /// Selections in the order their slips are attached.
    pub fn attachment_order(&self) -> Vec<PeriodSelection> {
        self.attachment_order
            .iter()
            .map(|&index| self.selections[index])
            .collect()
    }

    /// Moves the period at `position` of the attachment order to `target`.
    ///
    /// `target` is clamped to the last position; the rest keep their
    /// relative order. Returns `false` when `position` is out of range.
    pub fn reorder_period(&mut self, position: usize, target: usize) -> bool {
        if position >= self.attachment_order.len() {
            debug!(
                "event=reorder_period module=submission status=skip position={} len={}",
                position,
                self.attachment_order.len()
            );
            return false;
        }
        let target = target.min(self.attachment_order.len() - 1);
        if position != target {
            let mut next = self.attachment_order.clone();
            let index = next.remove(position);
            next.insert(target, index);
            self.attachment_order = next;
        }
        true
    }

    fn reset_attachment_order(&mut self) {
        self.attachment_order = (0..self.selections.len()).collect();
    }

    pub fn channels(&self) -> DeliveryChannels {
        self.channels
    }

    pub fn set_channels(&mut self, channels: DeliveryChannels) {
        self.channels = channels;
    }

    pub fn sequence(&self) -> &SequenceEngine {
        &self.sequence
    }

    pub fn sequence_mut(&mut self) -> &mut SequenceEngine {
        &mut self.sequence
    }

    /// Resolves every selection for the chosen plant, in selection order.
    ///
    /// Fails on the first selection without a configured source.
    pub fn resolve_periods(
        &self,
        registry: &PlantRegistry,
    ) -> Result<Vec<ResolvedPeriod>, DraftError> {
        let plant = self.plant.as_deref().ok_or(ValidationError::NoPlantSelected)?;
        let mut resolved = Vec::with_capacity(self.selections.len());
        for selection in &self.selections {
            resolved.push(registry.resolve(plant, selection)?);
        }
        Ok(resolved)
    }

    /// Validates and assembles the request for the transport.
    ///
    /// # Errors
    /// - `Validation` for missing plant, blank employee code, unselectable
    ///   months, or an incomplete content sequence.
    /// - `Configuration` for unknown plants or unconfigured financial years.
    pub fn build(
        &self,
        registry: &PlantRegistry,
        reference_date: NaiveDate,
    ) -> Result<SubmissionRequest, DraftError> {
        let plant = self
            .plant
            .clone()
            .ok_or(ValidationError::NoPlantSelected)?;

        let employee_code = match &self.mode {
            SubmissionMode::Single { employee_code } => {
                let trimmed = employee_code.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyEmployeeCode.into());
                }
                Some(trimmed.to_string())
            }
            SubmissionMode::Batch => None,
        };

        for selection in &self.selections {
            check_selectable(selection, reference_date)?;
        }
        let resolved = self.resolve_periods(registry)?;
        let payload = self.sequence.build_submission_payload(resolved)?;

        info!(
            "event=draft_build module=submission status=ok endpoint={} periods={} items={}",
            self.mode.endpoint(),
            payload.periods().len(),
            payload.items().len()
        );

        let attachment_sequence = self
            .attachment_order()
            .iter()
            .map(AttachmentSlot::from)
            .collect();

        Ok(SubmissionRequest {
            endpoint: self.mode.endpoint(),
            employee_code,
            plant,
            channels: self.channels,
            attachment_sequence,
            payload,
        })
    }
}
