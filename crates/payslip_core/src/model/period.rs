//! Financial-year and month value types.
//!
//! # Responsibility
//! - Map calendar dates to April-start financial years.
//! - Carry month names in financial-year order (`April … March`).
//!
//! # Invariants
//! - `FinancialYear` stores only its start year; the `YYYY-YY` label is derived.
//! - January, February and March belong to the calendar year after the start year.

use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Month names in financial-year order.
///
/// Derived ordering follows the financial year, so `April < March`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonthName {
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    January,
    February,
    March,
}

impl MonthName {
    /// All months, April first.
    pub const ALL: [MonthName; 12] = [
        MonthName::April,
        MonthName::May,
        MonthName::June,
        MonthName::July,
        MonthName::August,
        MonthName::September,
        MonthName::October,
        MonthName::November,
        MonthName::December,
        MonthName::January,
        MonthName::February,
        MonthName::March,
    ];

    /// Zero-based position inside the financial year (April = 0, March = 11).
    pub fn fy_index(self) -> usize {
        self as usize
    }

    /// Calendar month number (January = 1, December = 12).
    pub fn calendar_month(self) -> u32 {
        ((self.fy_index() as u32 + 3) % 12) + 1
    }

    /// Maps a calendar month number to its name. Returns `None` outside `1..=12`.
    pub fn from_calendar_month(month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::ALL[((month + 8) % 12) as usize])
    }

    /// Month name of a calendar date.
    pub fn of_date(date: NaiveDate) -> Self {
        // chrono guarantees month() in 1..=12
        Self::ALL[((date.month() + 8) % 12) as usize]
    }

    /// Whether this month falls in the second calendar year of its financial year.
    pub fn is_in_closing_quarter(self) -> bool {
        matches!(self, Self::January | Self::February | Self::March)
    }

    /// The calendar month before this one, wrapping April back to March.
    pub fn previous(self) -> Self {
        Self::ALL[(self.fy_index() + 11) % 12]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
        }
    }
}

impl Display for MonthName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthName {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|month| month.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidMonthName(trimmed.to_string()))
    }
}

/// April-to-March accounting period identified by its start year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Financial year governing `date`; January–March map to `year - 1`.
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            Self::new(date.year())
        } else {
            Self::new(date.year() - 1)
        }
    }

    pub fn start_year(self) -> i32 {
        self.start_year
    }

    pub fn end_year(self) -> i32 {
        self.start_year + 1
    }

    pub fn previous(self) -> Self {
        Self::new(self.start_year - 1)
    }

    pub fn next(self) -> Self {
        Self::new(self.start_year + 1)
    }

    /// Calendar year a month of this financial year falls in.
    pub fn calendar_year_of(self, month: MonthName) -> i32 {
        if month.is_in_closing_quarter() {
            self.end_year()
        } else {
            self.start_year
        }
    }

    /// Whether `date` lies between April 1 of the start year and March 31 of the end year.
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::containing(date) == self
    }

    /// Display label, e.g. `2024-25`.
    pub fn label(self) -> String {
        format!("{}-{:02}", self.start_year, self.end_year().rem_euclid(100))
    }

    /// Key form used by source configuration, e.g. `2024_25`.
    pub fn config_key(self) -> String {
        format!("{}_{:02}", self.start_year, self.end_year().rem_euclid(100))
    }
}

impl Display for FinancialYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for FinancialYear {
    type Err = ValidationError;

    /// Accepts `2024-25` and `2024_25`. The suffix must be the following year.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || ValidationError::InvalidFinancialYear(trimmed.to_string());

        let (start, suffix) = trimmed
            .split_once(['-', '_'])
            .ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if start.len() != 4 || suffix.len() != 2 || !all_digits(start) || !all_digits(suffix) {
            return Err(invalid());
        }
        let start_year: i32 = start.parse().map_err(|_| invalid())?;
        let suffix: i32 = suffix.parse().map_err(|_| invalid())?;

        let year = Self::new(start_year);
        if year.end_year().rem_euclid(100) != suffix {
            return Err(invalid());
        }
        Ok(year)
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinancialYear> for String {
    fn from(value: FinancialYear) -> Self {
        value.label()
    }
}

/// One user-chosen (month, financial year) pair, editable until submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSelection {
    pub month: MonthName,
    pub financial_year: FinancialYear,
}

impl PeriodSelection {
    pub fn new(month: MonthName, financial_year: FinancialYear) -> Self {
        Self {
            month,
            financial_year,
        }
    }

    /// Calendar year of the selected month.
    pub fn calendar_year(&self) -> i32 {
        self.financial_year.calendar_year_of(self.month)
    }
}

/// A selection bound to the document source configured for its plant and year.
///
/// Serialized field names follow the remote generation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    month: MonthName,
    financial_year: FinancialYear,
    #[serde(rename = "year", with = "year_text")]
    calendar_year: i32,
    #[serde(rename = "sheet_id_salary")]
    document_source_id: String,
    #[serde(rename = "sheet_id_drive")]
    drive_id: String,
}

impl ResolvedPeriod {
    pub(crate) fn new(
        selection: PeriodSelection,
        document_source_id: impl Into<String>,
        drive_id: impl Into<String>,
    ) -> Self {
        Self {
            month: selection.month,
            financial_year: selection.financial_year,
            calendar_year: selection.calendar_year(),
            document_source_id: document_source_id.into(),
            drive_id: drive_id.into(),
        }
    }

    pub fn month(&self) -> MonthName {
        self.month
    }

    pub fn financial_year(&self) -> FinancialYear {
        self.financial_year
    }

    pub fn calendar_year(&self) -> i32 {
        self.calendar_year
    }

    pub fn document_source_id(&self) -> &str {
        &self.document_source_id
    }

    pub fn drive_id(&self) -> &str {
        &self.drive_id
    }
}

/// Calendar years travel as decimal strings on the wire.
pub(crate) mod year_text {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(year: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(year)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(D::Error::custom)
    }
}
