//! # Percentage
//!
//! Three questions over two numbers `x` and `y`:
//!
//! | Mode       | Question               | Formula              |
//! |------------|------------------------|----------------------|
//! | `of`       | What is x% of y?       | `x × y / 100`        |
//! | `ratio`    | x is what % of y?      | `x / y × 100`        |
//! | `change`   | % change from x to y   | `(y − x) / |x| × 100`|

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

const MODES: &[ChoiceOption] = &[
    ChoiceOption::new("of", "What is X% of Y?"),
    ChoiceOption::new("ratio", "X is what % of Y?"),
    ChoiceOption::new("change", "% change from X to Y"),
];

const FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("mode", "Question", FieldKind::Choice(MODES)).default_value("of"),
    FieldSpec::new("x", "X", FieldKind::SignedDecimal).placeholder("15"),
    FieldSpec::new("y", "Y", FieldKind::SignedDecimal).placeholder("200"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageMode {
    Of,
    Ratio,
    Change,
}

impl PercentageMode {
    pub fn from_key(key: &str) -> Option<PercentageMode> {
        match key {
            "of" => Some(PercentageMode::Of),
            "ratio" => Some(PercentageMode::Ratio),
            "change" => Some(PercentageMode::Change),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageInput {
    pub mode: PercentageMode,
    pub x: f64,
    pub y: f64,
}

impl PercentageInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let key = raw.choice("mode", "question", MODES)?;
        let mode = PercentageMode::from_key(key)
            .ok_or_else(|| CalcError::invalid_input("mode", key, "Please select a valid question"))?;
        Ok(PercentageInput {
            mode,
            x: raw.number("x", "value for X")?,
            y: raw.number("y", "value for Y")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageResult {
    pub mode: PercentageMode,
    pub x: f64,
    pub y: f64,
    pub result: f64,
}

/// # Errors
///
/// * `InvalidInput` - division by zero in `ratio` (y = 0) or `change` (x = 0)
pub fn calculate(input: &PercentageInput) -> CalcResult<PercentageResult> {
    let PercentageInput { mode, x, y } = *input;
    let result = match mode {
        PercentageMode::Of => x * y / 100.0,
        PercentageMode::Ratio => {
            if y == 0.0 {
                return Err(CalcError::invalid_input("y", "0", "Y cannot be zero"));
            }
            x / y * 100.0
        }
        PercentageMode::Change => {
            if x == 0.0 {
                return Err(CalcError::invalid_input(
                    "x",
                    "0",
                    "Cannot calculate a percentage change from zero",
                ));
            }
            (y - x) / x.abs() * 100.0
        }
    };
    Ok(PercentageResult { mode, x, y, result })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Percentage;

impl Calculator for Percentage {
    type Input = PercentageInput;
    type Output = PercentageResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<PercentageInput> {
        PercentageInput::from_raw(raw)
    }

    fn compute(&self, input: &PercentageInput) -> CalcResult<PercentageResult> {
        calculate(input)
    }

    fn present(&self, r: &PercentageResult, settings: &Settings) -> Vec<ResultLine> {
        let label = match r.mode {
            PercentageMode::Of => "Result",
            PercentageMode::Ratio => "Percentage",
            PercentageMode::Change => "Change",
        };
        vec![ResultLine::new(label, self.summary(r, settings))]
    }

    fn summary(&self, r: &PercentageResult, settings: &Settings) -> String {
        let d = settings.statistics_digits;
        let (x, y, v) = (
            format::trimmed(r.x, d),
            format::trimmed(r.y, d),
            format::trimmed(r.result, d),
        );
        match r.mode {
            PercentageMode::Of => format!("{}% of {} = {}", x, y, v),
            PercentageMode::Ratio => format!("{} is {}% of {}", x, v, y),
            PercentageMode::Change => {
                let sign = if r.result > 0.0 { "+" } else { "" };
                format!("{} to {}: {}{}%", x, y, sign, v)
            }
        }
    }
}
