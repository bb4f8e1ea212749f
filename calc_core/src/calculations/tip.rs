//! # Tip Split
//!
//! ```text
//! tip        = bill × tip_percent / 100
//! per_person = (bill + tip) / people
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

pub const MAX_TIP_PERCENT: f64 = 100.0;
pub const MAX_PEOPLE: f64 = 100.0;

const FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("bill", "Bill Amount", FieldKind::Decimal).placeholder("85.50"),
    FieldSpec::new("tip_percent", "Tip (%)", FieldKind::Decimal).default_value("15"),
    FieldSpec::new("people", "People", FieldKind::Integer).default_value("1"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipInput {
    pub bill: f64,
    pub tip_percent: f64,
    pub people: u32,
}

impl TipInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let bill = raw.number("bill", "bill amount")?;
        let tip_percent = raw.number("tip_percent", "tip percentage")?;
        let people = raw.number("people", "number of people")?;
        if people < 1.0 || people > MAX_PEOPLE || people.fract() != 0.0 {
            return Err(CalcError::invalid_input(
                "people",
                people.to_string(),
                "Number of people must be a whole number between 1 and 100",
            ));
        }
        let input = TipInput {
            bill,
            tip_percent,
            people: people as u32,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.bill <= 0.0 {
            return Err(CalcError::invalid_input(
                "bill",
                self.bill.to_string(),
                "Bill amount must be greater than zero",
            ));
        }
        if !(0.0..=MAX_TIP_PERCENT).contains(&self.tip_percent) {
            return Err(CalcError::invalid_input(
                "tip_percent",
                self.tip_percent.to_string(),
                "Tip must be between 0 and 100%",
            ));
        }
        if self.people == 0 {
            return Err(CalcError::invalid_input("people", "0", "Number of people must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipResult {
    pub bill: f64,
    pub tip_percent: f64,
    pub people: u32,
    pub tip: f64,
    pub total: f64,
    pub per_person: f64,
}

pub fn calculate(input: &TipInput) -> CalcResult<TipResult> {
    input.validate()?;
    let tip = input.bill * input.tip_percent / 100.0;
    let total = input.bill + tip;
    Ok(TipResult {
        bill: input.bill,
        tip_percent: input.tip_percent,
        people: input.people,
        tip,
        total,
        per_person: total / input.people as f64,
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct TipSplit;

impl Calculator for TipSplit {
    type Input = TipInput;
    type Output = TipResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<TipInput> {
        TipInput::from_raw(raw)
    }

    fn compute(&self, input: &TipInput) -> CalcResult<TipResult> {
        calculate(input)
    }

    fn present(&self, r: &TipResult, settings: &Settings) -> Vec<ResultLine> {
        let d = settings.money_digits;
        vec![
            ResultLine::new("Tip", format::money(r.tip, "$", d)),
            ResultLine::new("Total", format::money(r.total, "$", d)),
            ResultLine::new("Per Person", format::money(r.per_person, "$", d)),
        ]
    }

    fn summary(&self, r: &TipResult, settings: &Settings) -> String {
        let d = settings.money_digits;
        format!(
            "Bill: {}, Tip ({}%): {}, Total: {}, Per person ({}): {}",
            format::money(r.bill, "$", d),
            format::trimmed(r.tip_percent, 2),
            format::money(r.tip, "$", d),
            format::money(r.total, "$", d),
            r.people,
            format::money(r.per_person, "$", d)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(bill: &str, pct: &str, people: &str) -> CalcResult<TipResult> {
        let raw = RawInputs::new()
            .with("bill", bill)
            .with("tip_percent", pct)
            .with("people", people);
        calculate(&TipInput::from_raw(&raw)?)
    }

    #[test]
    fn test_split() {
        let r = tip("100", "20", "4").unwrap();
        assert_eq!(r.tip, 20.0);
        assert_eq!(r.total, 120.0);
        assert_eq!(r.per_person, 30.0);
        assert_eq!(
            TipSplit.summary(&r, &Settings::default()),
            "Bill: $100.00, Tip (20%): $20.00, Total: $120.00, Per person (4): $30.00"
        );
    }

    #[test]
    fn test_validation() {
        assert_eq!(tip("0", "15", "1").unwrap_err().field(), Some("bill"));
        assert_eq!(tip("50", "150", "1").unwrap_err().field(), Some("tip_percent"));
        assert_eq!(tip("50", "15", "0").unwrap_err().field(), Some("people"));
        assert_eq!(tip("50", "15", "").unwrap_err().user_message(), "Please enter a valid number of people");
    }
}
