//! # Loan Payment (Amortised)
//!
//! ```text
//! i       = annual_rate / 12 / 100
//! payment = P × i × (1 + i)^N / ((1 + i)^N − 1)
//! ```
//!
//! With a zero rate the payment is simply `P / N`.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{FieldKind, FieldSpec, RawInputs};

use super::simple_interest::MAX_RATE_PERCENT;
use super::{Calculator, ResultLine};

/// 100 years of monthly payments
pub const MAX_MONTHS: f64 = 1200.0;

const FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("principal", "Loan Amount", FieldKind::Decimal).placeholder("250000"),
    FieldSpec::new("rate", "Annual Rate (%)", FieldKind::Decimal).placeholder("6.5"),
    FieldSpec::new("months", "Term (months)", FieldKind::Integer).placeholder("360"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub rate_percent: f64,
    pub months: f64,
}

impl LoanInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let input = LoanInput {
            principal: raw.number("principal", "loan amount")?,
            rate_percent: raw.number("rate", "interest rate")?,
            months: raw.number("months", "loan term")?,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.principal <= 0.0 {
            return Err(CalcError::invalid_input(
                "principal",
                self.principal.to_string(),
                "Loan amount must be greater than zero",
            ));
        }
        if !(0.0..=MAX_RATE_PERCENT).contains(&self.rate_percent) {
            return Err(CalcError::invalid_input(
                "rate",
                self.rate_percent.to_string(),
                "Rate must be between 0 and 1000",
            ));
        }
        if self.months < 1.0 || self.months > MAX_MONTHS || self.months.fract() != 0.0 {
            return Err(CalcError::invalid_input(
                "months",
                self.months.to_string(),
                "Term must be a whole number of months between 1 and 1200",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub principal: f64,
    pub rate_percent: f64,
    pub months: f64,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Monthly payment for a fully amortising loan
pub fn monthly_payment(principal: f64, rate_percent: f64, months: f64) -> f64 {
    let i = rate_percent / 12.0 / 100.0;
    if i == 0.0 {
        return principal / months;
    }
    // (1 + i)^N - 1 without cancellation, so tiny rates stay near P / N
    let log_growth = months * i.ln_1p();
    let excess = log_growth.exp_m1();
    if excess == 0.0 {
        return principal / months;
    }
    principal * i * log_growth.exp() / excess
}

pub fn calculate(input: &LoanInput) -> CalcResult<LoanResult> {
    input.validate()?;

    let payment = monthly_payment(input.principal, input.rate_percent, input.months);
    if !payment.is_finite() {
        return Err(CalcError::out_of_physical_range("Result is too large to display"));
    }
    let total_paid = payment * input.months;

    Ok(LoanResult {
        principal: input.principal,
        rate_percent: input.rate_percent,
        months: input.months,
        monthly_payment: payment,
        total_paid,
        total_interest: total_paid - input.principal,
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanPayment;

impl Calculator for LoanPayment {
    type Input = LoanInput;
    type Output = LoanResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<LoanInput> {
        LoanInput::from_raw(raw)
    }

    fn compute(&self, input: &LoanInput) -> CalcResult<LoanResult> {
        calculate(input)
    }

    fn present(&self, r: &LoanResult, settings: &Settings) -> Vec<ResultLine> {
        let d = settings.money_digits;
        vec![
            ResultLine::new("Monthly Payment", format::money(r.monthly_payment, "$", d)),
            ResultLine::new("Total Paid", format::money(r.total_paid, "$", d)),
            ResultLine::new("Total Interest", format::money(r.total_interest, "$", d)),
        ]
    }

    fn summary(&self, r: &LoanResult, settings: &Settings) -> String {
        let d = settings.money_digits;
        format!(
            "Loan: {} at {}% for {} months, Monthly Payment: {}, Total Interest: {}",
            format::money(r.principal, "$", d),
            format::trimmed(r.rate_percent, 4),
            r.months,
            format::money(r.monthly_payment, "$", d),
            format::money(r.total_interest, "$", d)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_year_mortgage() {
        // 200k at 6% over 360 months ≈ 1199.10
        let p = monthly_payment(200_000.0, 6.0, 360.0);
        assert_eq!(format::fixed(p, 2), "1199.10");
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let r = calculate(&LoanInput { principal: 1200.0, rate_percent: 0.0, months: 12.0 }).unwrap();
        assert_eq!(r.monthly_payment, 100.0);
        assert_eq!(r.total_interest, 0.0);
    }

    #[test]
    fn test_tiny_rate_approaches_even_split() {
        let r = calculate(&LoanInput { principal: 1200.0, rate_percent: 1e-16, months: 12.0 }).unwrap();
        assert!((r.monthly_payment - 100.0).abs() < 1e-9, "{}", r.monthly_payment);
        assert!(r.total_interest.abs() < 1e-6);
    }

    #[test]
    fn test_total_interest() {
        let r = calculate(&LoanInput { principal: 10_000.0, rate_percent: 5.0, months: 60.0 }).unwrap();
        assert!((r.total_paid - r.monthly_payment * 60.0).abs() < 1e-9);
        assert!(r.total_interest > 0.0);
    }

    #[test]
    fn test_validation() {
        let raw = RawInputs::new().with("principal", "1000").with("rate", "5").with("months", "0");
        let err = LoanInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.field(), Some("months"));

        let raw = raw.with("months", "12.5");
        assert!(LoanInput::from_raw(&raw).is_err());

        let raw = RawInputs::new().with("principal", "0").with("rate", "5").with("months", "12");
        assert_eq!(
            LoanInput::from_raw(&raw).unwrap_err().user_message(),
            "Loan amount must be greater than zero"
        );
    }
}
