//! # Compound Interest
//!
//! ```text
//! amount   = principal × (1 + r / n)^(n × t)
//! interest = amount − principal
//! ```
//!
//! `r` is the annual rate as a fraction, `n` the compounding periods per year
//! and `t` the term in years.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::simple_interest::MAX_RATE_PERCENT;
use super::{Calculator, ResultLine};

pub const MAX_YEARS: f64 = 1000.0;

const FREQUENCIES: &[ChoiceOption] = &[
    ChoiceOption::new("1", "Annually"),
    ChoiceOption::new("2", "Semi-annually"),
    ChoiceOption::new("4", "Quarterly"),
    ChoiceOption::new("12", "Monthly"),
    ChoiceOption::new("365", "Daily"),
];

const FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("principal", "Principal", FieldKind::Decimal).placeholder("1000"),
    FieldSpec::new("rate", "Annual Rate (%)", FieldKind::Decimal).placeholder("5"),
    FieldSpec::new("years", "Years", FieldKind::Decimal).placeholder("10"),
    FieldSpec::new("frequency", "Compounding", FieldKind::Choice(FREQUENCIES)).default_value("12"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: f64,
    pub rate_percent: f64,
    pub years: f64,
    /// Compounding periods per year
    pub periods_per_year: u32,
}

impl CompoundInterestInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let principal = raw.number("principal", "principal amount")?;
        let rate_percent = raw.number("rate", "interest rate")?;
        let years = raw.number("years", "number of years")?;
        let frequency = raw.choice("frequency", "compounding frequency", FREQUENCIES)?;
        let periods_per_year = frequency.parse::<u32>().map_err(|_| {
            CalcError::invalid_input("frequency", frequency, "Please select a valid compounding frequency")
        })?;

        let input = CompoundInterestInput {
            principal,
            rate_percent,
            years,
            periods_per_year,
        };
        input.validate()?;
        Ok(input)
    }

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
        if self.years <= 0.0 || self.years > MAX_YEARS {
            return Err(CalcError::invalid_input(
                "years",
                self.years.to_string(),
                "Years must be greater than zero and at most 1000",
            ));
        }
        if self.periods_per_year == 0 {
            return Err(CalcError::invalid_input(
                "frequency",
                "0",
                "Please select a valid compounding frequency",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub principal: f64,
    pub rate_percent: f64,
    pub years: f64,
    pub periods_per_year: u32,
    pub amount: f64,
    pub interest: f64,
}

/// Calculate the future value.
///
/// # Errors
///
/// * `OutOfPhysicalRange` - the amount overflows
pub fn calculate(input: &CompoundInterestInput) -> CalcResult<CompoundInterestResult> {
    input.validate()?;

    let n = input.periods_per_year as f64;
    let r = input.rate_percent / 100.0;
    let amount = input.principal * (1.0 + r / n).powf(n * input.years);
    if !amount.is_finite() {
        return Err(CalcError::out_of_physical_range("Result is too large to display"));
    }

    Ok(CompoundInterestResult {
        principal: input.principal,
        rate_percent: input.rate_percent,
        years: input.years,
        periods_per_year: input.periods_per_year,
        amount,
        interest: amount - input.principal,
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundInterest;

impl Calculator for CompoundInterest {
    type Input = CompoundInterestInput;
    type Output = CompoundInterestResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<CompoundInterestInput> {
        CompoundInterestInput::from_raw(raw)
    }

    fn compute(&self, input: &CompoundInterestInput) -> CalcResult<CompoundInterestResult> {
        calculate(input)
    }

    fn present(&self, r: &CompoundInterestResult, settings: &Settings) -> Vec<ResultLine> {
        let d = settings.money_digits;
        vec![
            ResultLine::new("Final Amount", format::money(r.amount, "$", d)),
            ResultLine::new("Total Interest", format::money(r.interest, "$", d)),
            ResultLine::new("Principal", format::money(r.principal, "$", d)),
        ]
    }

    fn summary(&self, r: &CompoundInterestResult, settings: &Settings) -> String {
        let d = settings.money_digits;
        format!(
            "Principal: {}, Rate: {}%, Years: {}, Compounded {}x/year, Amount: {}, Interest: {}",
            format::money(r.principal, "$", d),
            format::trimmed(r.rate_percent, 4),
            format::trimmed(r.years, 4),
            r.periods_per_year,
            format::money(r.amount, "$", d),
            format::money(r.interest, "$", d)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(principal: f64, rate: f64, years: f64, n: u32) -> CompoundInterestInput {
        CompoundInterestInput {
            principal,
            rate_percent: rate,
            years,
            periods_per_year: n,
        }
    }

    #[test]
    fn test_annual() {
        let r = calculate(&input(1000.0, 10.0, 2.0, 1)).unwrap();
        assert!((r.amount - 1210.0).abs() < 1e-9);
        assert!((r.interest - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly() {
        // 1000 × (1 + 0.05/12)^120 ≈ 1647.01
        let r = calculate(&input(1000.0, 5.0, 10.0, 12)).unwrap();
        assert_eq!(format::fixed(r.amount, 2), "1647.01");
    }

    #[test]
    fn test_zero_rate() {
        let r = calculate(&input(500.0, 0.0, 5.0, 365)).unwrap();
        assert_eq!(r.amount, 500.0);
        assert_eq!(r.interest, 0.0);
    }

    #[test]
    fn test_from_raw() {
        let raw = RawInputs::new()
            .with("principal", "1000")
            .with("rate", "10")
            .with("years", "2")
            .with("frequency", "4");
        let parsed = CompoundInterestInput::from_raw(&raw).unwrap();
        assert_eq!(parsed.periods_per_year, 4);

        let raw = raw.with("frequency", "3");
        let err = CompoundInterestInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.field(), Some("frequency"));
    }

    #[test]
    fn test_validation() {
        assert!(calculate(&input(-1.0, 5.0, 1.0, 1)).is_err());
        assert!(calculate(&input(1.0, 5.0, 0.0, 1)).is_err());
        assert!(calculate(&input(1.0, 1001.0, 1.0, 1)).is_err());
    }
}
