//! # Steps to Calories
//!
//! ```text
//! calories = round(steps × (0.57 × weight_kg) / 1000)
//! ```
//!
//! Weight entered in pounds is converted with 0.45359237 kg/lb. Steps are
//! clamped to 100..=200,000 and weight to 30..=200 kg.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

pub const KG_PER_LB: f64 = 0.45359237;
pub const STEPS_RANGE: (f64, f64) = (100.0, 200_000.0);
pub const WEIGHT_KG_RANGE: (f64, f64) = (30.0, 200.0);

/// kcal per kg of body weight per 1000 steps
const KCAL_PER_KG_PER_1000_STEPS: f64 = 0.57;

const WEIGHT_UNITS: &[ChoiceOption] = &[
    ChoiceOption::new("kg", "Kilograms"),
    ChoiceOption::new("lb", "Pounds"),
];

const FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("steps", "Steps", FieldKind::Integer).placeholder("10000"),
    FieldSpec::new("weight", "Weight", FieldKind::Decimal).placeholder("70"),
    FieldSpec::new("weight_unit", "Weight Unit", FieldKind::Choice(WEIGHT_UNITS)).default_value("kg"),
];

/// Validated inputs, already clamped and in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepsInput {
    pub steps: f64,
    pub weight_kg: f64,
}

impl StepsInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let steps = raw.number("steps", "number of steps")?;
        if steps <= 0.0 {
            return Err(CalcError::invalid_input(
                "steps",
                steps.to_string(),
                "Steps must be greater than zero",
            ));
        }
        let weight = raw.number("weight", "weight")?;
        if weight <= 0.0 {
            return Err(CalcError::invalid_input(
                "weight",
                weight.to_string(),
                "Weight must be greater than zero",
            ));
        }
        let weight_kg = match raw.choice("weight_unit", "weight unit", WEIGHT_UNITS)? {
            "lb" => weight * KG_PER_LB,
            _ => weight,
        };

        Ok(StepsInput {
            steps: steps.clamp(STEPS_RANGE.0, STEPS_RANGE.1),
            weight_kg: weight_kg.clamp(WEIGHT_KG_RANGE.0, WEIGHT_KG_RANGE.1),
        })
    }
}

/// Steps to calories result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepsResult {
    pub steps: f64,
    pub weight_kg: f64,
    /// Rounded kcal
    pub calories: f64,
}

pub fn calculate(input: &StepsInput) -> CalcResult<StepsResult> {
    let calories = (input.steps * (KCAL_PER_KG_PER_1000_STEPS * input.weight_kg) / 1000.0).round();
    Ok(StepsResult {
        steps: input.steps,
        weight_kg: input.weight_kg,
        calories,
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepsToCalories;

impl Calculator for StepsToCalories {
    type Input = StepsInput;
    type Output = StepsResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<StepsInput> {
        StepsInput::from_raw(raw)
    }

    fn compute(&self, input: &StepsInput) -> CalcResult<StepsResult> {
        calculate(input)
    }

    fn present(&self, r: &StepsResult, _settings: &Settings) -> Vec<ResultLine> {
        vec![
            ResultLine::new("Calories Burned", format!("{} kcal", format::grouped(r.calories, 0))),
            ResultLine::new("Steps", format::grouped(r.steps, 0)),
            ResultLine::new("Weight", format!("{} kg", format::trimmed(r.weight_kg, 1))),
        ]
    }

    fn summary(&self, r: &StepsResult, _settings: &Settings) -> String {
        format!(
            "{} steps at {} kg = {} kcal",
            format::grouped(r.steps, 0),
            format::trimmed(r.weight_kg, 1),
            format::grouped(r.calories, 0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(steps: &str, weight: &str, unit: &str) -> CalcResult<StepsResult> {
        let raw = RawInputs::new()
            .with("steps", steps)
            .with("weight", weight)
            .with("weight_unit", unit);
        calculate(&StepsInput::from_raw(&raw)?)
    }

    #[test]
    fn test_metric() {
        // 10000 × 0.57 × 70 / 1000 = 399
        assert_eq!(run("10000", "70", "kg").unwrap().calories, 399.0);
    }

    #[test]
    fn test_pounds_are_converted() {
        let r = run("10000", "154.3236", "lb").unwrap();
        assert!((r.weight_kg - 70.0).abs() < 1e-3);
        assert_eq!(r.calories, 399.0);
    }

    #[test]
    fn test_clamping() {
        let r = run("5", "10", "kg").unwrap();
        assert_eq!(r.steps, 100.0);
        assert_eq!(r.weight_kg, 30.0);

        let r = run("999999", "500", "kg").unwrap();
        assert_eq!(r.steps, 200_000.0);
        assert_eq!(r.weight_kg, 200.0);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(run("0", "70", "kg").unwrap_err().user_message(), "Steps must be greater than zero");
        assert_eq!(run("100", "", "kg").unwrap_err().user_message(), "Please enter a valid weight");
        assert_eq!(run("100", "70", "").unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_summary() {
        let r = run("10000", "70", "kg").unwrap();
        assert_eq!(StepsToCalories.summary(&r, &Settings::default()), "10,000 steps at 70 kg = 399 kcal");
    }
}
