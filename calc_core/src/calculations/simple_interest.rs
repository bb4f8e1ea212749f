//! # Simple Interest
//!
//! ```text
//! interest = principal × rate × time_years / 100
//! total    = principal + interest
//! ```
//!
//! Time may be entered in years, months (÷ 12) or days (÷ 365).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::simple_interest::{calculate, SimpleInterestInput, TimeUnit};
//!
//! let input = SimpleInterestInput {
//!     principal: 1000.0,
//!     rate_percent: 10.0,
//!     time: 1.0,
//!     time_unit: TimeUnit::Years,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.interest, 100.0);
//! assert_eq!(result.total, 1100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

/// Time is clamped into this range after validation
pub const TIME_RANGE: (f64, f64) = (0.0001, 100_000.0);

/// Maximum accepted annual rate (percent)
pub const MAX_RATE_PERCENT: f64 = 1000.0;

const TIME_UNITS: &[ChoiceOption] = &[
    ChoiceOption::new("years", "Years"),
    ChoiceOption::new("months", "Months"),
    ChoiceOption::new("days", "Days"),
];

const FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("principal", "Principal", FieldKind::Decimal).placeholder("1000"),
    FieldSpec::new("rate", "Annual Rate (%)", FieldKind::Decimal).placeholder("5"),
    FieldSpec::new("time", "Time", FieldKind::Decimal).placeholder("1"),
    FieldSpec::new("time_unit", "Time Unit", FieldKind::Choice(TIME_UNITS)).default_value("years"),
];

/// Unit the time period is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Years,
    Months,
    Days,
}

impl TimeUnit {
    pub fn from_key(key: &str) -> Option<TimeUnit> {
        match key {
            "years" => Some(TimeUnit::Years),
            "months" => Some(TimeUnit::Months),
            "days" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    /// Normalize a period to years
    pub fn to_years(&self, time: f64) -> f64 {
        match self {
            TimeUnit::Years => time,
            TimeUnit::Months => time / 12.0,
            TimeUnit::Days => time / 365.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Days => "days",
        }
    }
}

/// Validated simple interest inputs.
///
/// ## JSON Example
///
/// ```json
/// { "principal": 1000.0, "rate_percent": 10.0, "time": 1.0, "time_unit": "years" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: f64,
    /// Annual rate in percent
    pub rate_percent: f64,
    pub time: f64,
    pub time_unit: TimeUnit,
}

impl SimpleInterestInput {
    /// Parse and range-check raw field values.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let principal = raw.number("principal", "principal amount")?;
        let rate_percent = raw.number("rate", "interest rate")?;
        let time = raw.number("time", "time period")?;
        let unit_key = raw.choice("time_unit", "time unit", TIME_UNITS)?;
        let time_unit = TimeUnit::from_key(unit_key)
            .ok_or_else(|| CalcError::invalid_input("time_unit", unit_key, "Please select a valid time unit"))?;

        let input = SimpleInterestInput {
            principal,
            rate_percent,
            time,
            time_unit,
        };
        input.validate()?;
        Ok(input)
    }

    /// Validate ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if self.principal < 0.0 {
            return Err(CalcError::invalid_input(
                "principal",
                self.principal.to_string(),
                "Principal cannot be negative",
            ));
        }
        if !(0.0..=MAX_RATE_PERCENT).contains(&self.rate_percent) {
            return Err(CalcError::invalid_input(
                "rate",
                self.rate_percent.to_string(),
                "Rate must be between 0 and 1000",
            ));
        }
        if self.time <= 0.0 {
            return Err(CalcError::invalid_input(
                "time",
                self.time.to_string(),
                "Time must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Simple interest results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub principal: f64,
    pub rate_percent: f64,
    /// Time after clamping, in the entered unit
    pub time: f64,
    pub time_unit: TimeUnit,
    pub time_years: f64,
    pub interest: f64,
    pub total: f64,
}

/// Calculate simple interest.
pub fn calculate(input: &SimpleInterestInput) -> CalcResult<SimpleInterestResult> {
    input.validate()?;

    let time = input.time.clamp(TIME_RANGE.0, TIME_RANGE.1);
    let time_years = input.time_unit.to_years(time);
    let interest = input.principal * input.rate_percent * time_years / 100.0;

    Ok(SimpleInterestResult {
        principal: input.principal,
        rate_percent: input.rate_percent,
        time,
        time_unit: input.time_unit,
        time_years,
        interest,
        total: input.principal + interest,
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleInterest;

impl Calculator for SimpleInterest {
    type Input = SimpleInterestInput;
    type Output = SimpleInterestResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<SimpleInterestInput> {
        SimpleInterestInput::from_raw(raw)
    }

    fn compute(&self, input: &SimpleInterestInput) -> CalcResult<SimpleInterestResult> {
        calculate(input)
    }

    fn present(&self, r: &SimpleInterestResult, settings: &Settings) -> Vec<ResultLine> {
        let d = settings.money_digits;
        vec![
            ResultLine::new("Principal", format::money(r.principal, "$", d)),
            ResultLine::new("Interest", format::money(r.interest, "$", d)),
            ResultLine::new("Total Amount", format::money(r.total, "$", d)),
            ResultLine::new("Time (years)", format::trimmed(r.time_years, 4)),
        ]
    }

    fn summary(&self, r: &SimpleInterestResult, settings: &Settings) -> String {
        let d = settings.money_digits;
        format!(
            "Principal: {}, Rate: {}%, Time: {} {}, Interest: {}, Total: {}",
            format::money(r.principal, "$", d),
            format::trimmed(r.rate_percent, 4),
            format::trimmed(r.time, 4),
            r.time_unit.label(),
            format::money(r.interest, "$", d),
            format::money(r.total, "$", d)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(principal: &str, rate: &str, time: &str, unit: &str) -> RawInputs {
        RawInputs::new()
            .with("principal", principal)
            .with("rate", rate)
            .with("time", time)
            .with("time_unit", unit)
    }

    #[test]
    fn test_one_year() {
        let input = SimpleInterestInput::from_raw(&raw("1000", "10", "1", "years")).unwrap();
        let result = calculate(&input).unwrap();
        assert_eq!(format::fixed(result.interest, 2), "100.00");
        assert_eq!(format::fixed(result.total, 2), "1100.00");
    }

    #[test]
    fn test_months_and_days() {
        let input = SimpleInterestInput::from_raw(&raw("1200", "10", "6", "months")).unwrap();
        let result = calculate(&input).unwrap();
        assert!((result.interest - 60.0).abs() < 1e-9);

        let input = SimpleInterestInput::from_raw(&raw("3650", "10", "365", "days")).unwrap();
        let result = calculate(&input).unwrap();
        assert!((result.interest - 365.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_is_clamped() {
        let input = SimpleInterestInput::from_raw(&raw("100", "1", "500000", "years")).unwrap();
        let result = calculate(&input).unwrap();
        assert_eq!(result.time, 100_000.0);
    }

    #[test]
    fn test_first_failure_wins() {
        // Both principal and rate are bad; principal is reported
        let err = SimpleInterestInput::from_raw(&raw("", "5000", "1", "years")).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
        assert_eq!(err.user_message(), "Please enter a valid principal amount");
    }

    #[test]
    fn test_range_errors() {
        let err = SimpleInterestInput::from_raw(&raw("100", "1000.5", "1", "years")).unwrap_err();
        assert_eq!(err.user_message(), "Rate must be between 0 and 1000");

        let err = SimpleInterestInput::from_raw(&raw("100", "5", "0", "years")).unwrap_err();
        assert_eq!(err.user_message(), "Time must be greater than zero");

        let err = SimpleInterestInput::from_raw(&raw("100", "5", "1", "weeks")).unwrap_err();
        assert_eq!(err.field(), Some("time_unit"));
    }

    #[test]
    fn test_zero_principal_is_allowed() {
        let input = SimpleInterestInput::from_raw(&raw("0", "5", "1", "years")).unwrap();
        assert_eq!(calculate(&input).unwrap().total, 0.0);
    }

    #[test]
    fn test_summary() {
        let input = SimpleInterestInput::from_raw(&raw("1000", "10", "1", "years")).unwrap();
        let result = calculate(&input).unwrap();
        let summary = SimpleInterest.summary(&result, &Settings::default());
        assert_eq!(
            summary,
            "Principal: $1,000.00, Rate: 10%, Time: 1 years, Interest: $100.00, Total: $1,100.00"
        );
    }
}
