//! Financial-year and month selection rules.
//!
//! # Responsibility
//! - Enumerate selectable financial years and months relative to a reference date.
//! - Resolve a selection to the document source configured for a plant.
//!
//! # Invariants
//! - Every function takes its reference date explicitly; nothing reads the clock.
//! - Payroll periods are retrospective: the reference month and later months
//!   are never selectable.
//! - Source lookup always checks the plant mapping, even for enumerated choices.

use crate::error::{ConfigurationError, ValidationError};
use crate::model::period::{FinancialYear, MonthName, PeriodSelection, ResolvedPeriod};
use crate::model::plant::PlantConfig;
use chrono::NaiveDate;
use log::warn;
use std::cmp::Ordering;

/// First financial year offered by the selection UI.
pub const DEFAULT_START_YEAR: i32 = 2024;

/// Financial year governing `date`.
pub fn financial_year_of(date: NaiveDate) -> FinancialYear {
    FinancialYear::containing(date)
}

/// Financial years from `start_year` through the one containing `reference_date`.
///
/// Ascending. Future financial years are never listed; returns an empty list
/// when `start_year` is after the current financial year.
pub fn list_financial_years(reference_date: NaiveDate, start_year: i32) -> Vec<FinancialYear> {
    let current = financial_year_of(reference_date);
    (start_year..=current.start_year())
        .map(FinancialYear::new)
        .collect()
}

/// Months of `financial_year` strictly before the reference calendar month.
///
/// - Past financial year: all twelve months.
/// - Future financial year: empty.
/// - Current financial year: April up to, excluding, the reference month.
pub fn list_available_months(
    financial_year: FinancialYear,
    reference_date: NaiveDate,
) -> Vec<MonthName> {
    let current = financial_year_of(reference_date);
    match financial_year.cmp(&current) {
        Ordering::Less => MonthName::ALL.to_vec(),
        Ordering::Greater => Vec::new(),
        Ordering::Equal => {
            let reference_month = MonthName::of_date(reference_date);
            MonthName::ALL[..reference_month.fy_index()].to_vec()
        }
    }
}

/// First selectable month, used to reseed a selection after a year change.
pub fn first_available_month(
    financial_year: FinancialYear,
    reference_date: NaiveDate,
) -> Option<MonthName> {
    list_available_months(financial_year, reference_date)
        .first()
        .copied()
}

/// Rejects a selection that `list_available_months` would not offer.
pub fn check_selectable(
    selection: &PeriodSelection,
    reference_date: NaiveDate,
) -> Result<(), ValidationError> {
    if list_available_months(selection.financial_year, reference_date).contains(&selection.month)
    {
        return Ok(());
    }
    Err(ValidationError::MonthNotSelectable {
        month: selection.month,
        financial_year: selection.financial_year,
    })
}

/// Binds `selection` to the document source `plant` has for its financial year.
///
/// # Errors
/// - `ConfigurationError::MissingSource` when the plant has no source for
///   the selected financial year.
pub fn resolve_document_source(
    plant: &PlantConfig,
    selection: &PeriodSelection,
) -> Result<ResolvedPeriod, ConfigurationError> {
    let Some(source_id) = plant.document_source(selection.financial_year) else {
        warn!(
            "event=resolve_source module=period status=error plant={} financial_year={}",
            plant.name(),
            selection.financial_year
        );
        return Err(ConfigurationError::MissingSource {
            plant: plant.name().to_string(),
            financial_year: selection.financial_year,
        });
    };
    Ok(ResolvedPeriod::new(*selection, source_id, plant.drive_id()))
}

/// The month before the reference month, expressed in financial-year terms.
///
/// April rolls back to March of the previous financial year. January yields
/// December of the same financial year.
pub fn default_previous_period(reference_date: NaiveDate) -> PeriodSelection {
    let current = financial_year_of(reference_date);
    let reference_month = MonthName::of_date(reference_date);
    let financial_year = if reference_month == MonthName::April {
        current.previous()
    } else {
        current
    };
    PeriodSelection::new(reference_month.previous(), financial_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn april_reference_has_no_months_in_current_year() {
        let today = date(2025, 4, 15);
        assert!(list_available_months(FinancialYear::new(2025), today).is_empty());
        assert_eq!(first_available_month(FinancialYear::new(2025), today), None);
        assert_eq!(
            first_available_month(FinancialYear::new(2024), today),
            Some(MonthName::April)
        );
    }

    #[test]
    fn default_period_is_always_selectable() {
        let mut day = date(2024, 4, 1);
        while day < date(2027, 4, 1) {
            let selection = default_previous_period(day);
            assert!(
                check_selectable(&selection, day).is_ok(),
                "default {selection:?} not selectable on {day}"
            );
            day = day.succ_opt().unwrap();
        }
    }
}
