//! # Body Mass Index
//!
//! ```text
//! metric:   bmi = weight_kg / height_m²
//! imperial: bmi = 703 × weight_lb / height_in²
//! ```
//!
//! Categories follow the WHO adult cut-offs.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

/// lb/in² -> kg/m²
pub const IMPERIAL_FACTOR: f64 = 703.0;

const SYSTEMS: &[ChoiceOption] = &[
    ChoiceOption::new("metric", "Metric (kg, cm)"),
    ChoiceOption::new("imperial", "Imperial (lb, in)"),
];

const FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("system", "Units", FieldKind::Choice(SYSTEMS)).default_value("metric"),
    FieldSpec::new("weight", "Weight", FieldKind::Decimal).placeholder("70"),
    FieldSpec::new("height", "Height", FieldKind::Decimal).placeholder("175"),
];

/// Measurement system for weight and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and centimetres
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}

/// WHO weight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> BmiCategory {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub system: UnitSystem,
    /// kg or lb
    pub weight: f64,
    /// cm or in
    pub height: f64,
}

impl BmiInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let system = match raw.choice("system", "unit system", SYSTEMS)? {
            "imperial" => UnitSystem::Imperial,
            _ => UnitSystem::Metric,
        };
        let weight = raw.number("weight", "weight")?;
        let height = raw.number("height", "height")?;
        let input = BmiInput { system, weight, height };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.weight <= 0.0 {
            return Err(CalcError::invalid_input(
                "weight",
                self.weight.to_string(),
                "Weight must be greater than zero",
            ));
        }
        if self.height <= 0.0 {
            return Err(CalcError::invalid_input(
                "height",
                self.height.to_string(),
                "Height must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let bmi = match input.system {
        UnitSystem::Metric => {
            let meters = input.height / 100.0;
            input.weight / (meters * meters)
        }
        UnitSystem::Imperial => IMPERIAL_FACTOR * input.weight / (input.height * input.height),
    };
    Ok(BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bmi;

impl Calculator for Bmi {
    type Input = BmiInput;
    type Output = BmiResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<BmiInput> {
        BmiInput::from_raw(raw)
    }

    fn compute(&self, input: &BmiInput) -> CalcResult<BmiResult> {
        calculate(input)
    }

    fn present(&self, r: &BmiResult, _settings: &Settings) -> Vec<ResultLine> {
        vec![
            ResultLine::new("BMI", format::fixed(r.bmi, 1)),
            ResultLine::new("Category", r.category.display_name()),
        ]
    }

    fn summary(&self, r: &BmiResult, _settings: &Settings) -> String {
        format!("BMI: {} ({})", format::fixed(r.bmi, 1), r.category.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bmi(system: &str, weight: &str, height: &str) -> CalcResult<BmiResult> {
        let raw = RawInputs::new()
            .with("system", system)
            .with("weight", weight)
            .with("height", height);
        calculate(&BmiInput::from_raw(&raw)?)
    }

    #[test]
    fn test_metric() {
        let r = bmi("metric", "70", "175").unwrap();
        assert!((r.bmi - 22.857).abs() < 1e-3);
        assert_eq!(r.category, BmiCategory::Normal);
        assert_eq!(Bmi.summary(&r, &Settings::default()), "BMI: 22.9 (Normal weight)");
    }

    #[test]
    fn test_imperial() {
        let r = bmi("imperial", "154", "69").unwrap();
        assert!((r.bmi - 703.0 * 154.0 / 4761.0).abs() < 1e-12);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(bmi("metric", "0", "175").unwrap_err().user_message(), "Weight must be greater than zero");
        assert_eq!(bmi("metric", "70", "").unwrap_err().field(), Some("height"));
        assert_eq!(bmi("", "70", "175").unwrap_err().error_code(), "MISSING_FIELD");
    }
}
