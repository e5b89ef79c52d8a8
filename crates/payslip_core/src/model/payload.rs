//! Canonical submission payload.
//!
//! # Invariants
//! - `periods` is never empty; the primary period is `periods[0]`.
//! - `items` is ordered with dense sequence numbers and holds exactly one message.
//!
//! # Wire shape
//! The primary period is emitted as flat `sheet_id_salary`, `sheet_id_drive`,
//! `full_month` and `full_year` fields next to `months_data`, so single-period
//! consumers read it without walking the list.

use crate::model::period::{year_text, MonthName, ResolvedPeriod};
use crate::model::sequence_item::{ItemKind, SequenceItem};
use serde::{Serialize, Serializer};

/// Ordered content plus resolved periods, ready for the submission transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    periods: Vec<ResolvedPeriod>,
    items: Vec<SequenceItem>,
}

#[derive(Serialize)]
struct PayloadWire<'a> {
    sheet_id_salary: &'a str,
    sheet_id_drive: &'a str,
    full_month: MonthName,
    #[serde(with = "year_text")]
    full_year: i32,
    months_data: &'a [ResolvedPeriod],
    content_sequence: &'a [SequenceItem],
}

impl Payload {
    /// Builds a payload from already-validated items.
    ///
    /// Returns `None` when `periods` is empty.
    pub(crate) fn new(periods: Vec<ResolvedPeriod>, items: Vec<SequenceItem>) -> Option<Self> {
        if periods.is_empty() {
            return None;
        }
        Some(Self { periods, items })
    }

    /// First selected period, kept for single-period consumers.
    pub fn primary_period(&self) -> &ResolvedPeriod {
        &self.periods[0]
    }

    pub fn periods(&self) -> &[ResolvedPeriod] {
        &self.periods
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    /// The single template message item.
    pub fn message(&self) -> Option<&SequenceItem> {
        self.items.iter().find(|item| item.is_message())
    }

    /// Attachments in submission order.
    pub fn attachments(&self) -> impl Iterator<Item = &SequenceItem> {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::Attachment)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let primary = self.primary_period();
        PayloadWire {
            sheet_id_salary: primary.document_source_id(),
            sheet_id_drive: primary.drive_id(),
            full_month: primary.month(),
            full_year: primary.calendar_year(),
            months_data: &self.periods,
            content_sequence: &self.items,
        }
        .serialize(serializer)
    }
}
