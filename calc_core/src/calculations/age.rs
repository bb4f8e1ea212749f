//! # Age Calculator
//!
//! Exact calendar difference between a birth date and a reference date
//! (today unless given):
//!
//! 1. Subtract years, months and days field by field.
//! 2. If days went negative, borrow a month and add the length of the
//!    calendar month before the reference date's month.
//! 3. If months went negative, borrow a year and add 12.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::age::{calculate_at, AgeInput};
//! use chrono::NaiveDate;
//!
//! let input = AgeInput {
//!     birth_date: NaiveDate::from_ymd_opt(2000, 2, 29).unwrap(),
//!     as_of: None,
//! };
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let age = calculate_at(&input, today).unwrap();
//! assert_eq!((age.years, age.months, age.days), (24, 0, 1));
//! ```

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

const DATE_FORMAT: &str = "%Y-%m-%d";

const FIELDS: [FieldSpec; 2] = [
    FieldSpec::new("birth_date", "Date of Birth", FieldKind::Date).placeholder("YYYY-MM-DD"),
    FieldSpec::new("as_of", "Age on (optional)", FieldKind::Date).placeholder("today"),
];

/// Validated age inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
    /// Reference date; `None` means today
    pub as_of: Option<NaiveDate>,
}

fn parse_date(raw: &RawInputs, key: &str, label: &str) -> CalcResult<Option<NaiveDate>> {
    let text = raw.text(key);
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CalcError::invalid_input(key, text, format!("Please enter a valid {} (YYYY-MM-DD)", label)))
}

impl AgeInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let birth_date = parse_date(raw, "birth_date", "date of birth")?
            .ok_or_else(|| CalcError::missing_field("date of birth"))?;
        let as_of = parse_date(raw, "as_of", "reference date")?;
        Ok(AgeInput { birth_date, as_of })
    }
}

/// Elapsed calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    pub birth_date: NaiveDate,
    pub as_of: NaiveDate,
    pub years: i32,
    pub months: i32,
    pub days: i32,
    /// Whole days between the two dates
    pub total_days: i64,
}

/// Length of the calendar month preceding `date`'s month
fn days_in_previous_month(date: NaiveDate) -> CalcResult<i32> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day() as i32)
        .ok_or_else(|| CalcError::Internal {
            message: format!("no month precedes {}", date),
        })
}

/// Calculate age as of a fixed date.
///
/// # Errors
///
/// * `InvalidInput` - the birth date is after the reference date
pub fn calculate_at(input: &AgeInput, today: NaiveDate) -> CalcResult<AgeResult> {
    let as_of = input.as_of.unwrap_or(today);
    let birth = input.birth_date;
    if birth > as_of {
        return Err(CalcError::invalid_input(
            "birth_date",
            birth.format(DATE_FORMAT).to_string(),
            "Date of birth cannot be in the future",
        ));
    }

    let mut years = as_of.year() - birth.year();
    let mut months = as_of.month() as i32 - birth.month() as i32;
    let mut days = as_of.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_previous_month(as_of)?;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    Ok(AgeResult {
        birth_date: birth,
        as_of,
        years,
        months,
        days,
        total_days: (as_of - birth).num_days(),
    })
}

/// Calculate age as of today (local time).
pub fn calculate(input: &AgeInput) -> CalcResult<AgeResult> {
    calculate_at(input, Local::now().date_naive())
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeCalculator;

impl Calculator for AgeCalculator {
    type Input = AgeInput;
    type Output = AgeResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<AgeInput> {
        AgeInput::from_raw(raw)
    }

    fn compute(&self, input: &AgeInput) -> CalcResult<AgeResult> {
        calculate(input)
    }

    fn present(&self, r: &AgeResult, _settings: &Settings) -> Vec<ResultLine> {
        vec![
            ResultLine::new("Age", format!("{} years, {} months, {} days", r.years, r.months, r.days)),
            ResultLine::new("Total Days", format::grouped(r.total_days as f64, 0)),
            ResultLine::new("As of", r.as_of.format(DATE_FORMAT).to_string()),
        ]
    }

    fn summary(&self, r: &AgeResult, _settings: &Settings) -> String {
        format!(
            "Age: {} years, {} months, {} days (born {}, as of {})",
            r.years,
            r.months,
            r.days,
            r.birth_date.format(DATE_FORMAT),
            r.as_of.format(DATE_FORMAT)
        )
    }
}
