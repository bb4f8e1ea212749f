//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - typed, range-checked inputs (JSON-serializable)
//! - `*Result` - computed outputs (JSON-serializable)
//! - `calculate(input) -> CalcResult<*Result>` - pure calculation function
//!
//! and implements [`Calculator`], which adds field descriptions, validation
//! from raw strings, and result presentation. [`CalculatorId`] is the
//! registry: one variant per calculator, dispatching to its implementation.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculatorId;
//! use calc_core::config::Settings;
//! use calc_core::inputs::RawInputs;
//!
//! let raw = RawInputs::new()
//!     .with("principal", "1000")
//!     .with("rate", "10")
//!     .with("time", "1")
//!     .with("time_unit", "years");
//!
//! let eval = CalculatorId::SimpleInterest.evaluate(&raw, &Settings::default()).unwrap();
//! assert!(eval.summary.contains("Interest: $100.00"));
//! ```

pub mod age;
pub mod bmi;
pub mod compound_interest;
pub mod converters;
pub mod gpa;
pub mod heart_rate;
pub mod loan;
pub mod percentage;
pub mod simple_interest;
pub mod statistics;
pub mod steps_calories;
pub mod tip;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::inputs::{FieldSpec, RawInputs};
use crate::units::Quantity;

pub use converters::{CurrencyConverter, UnitConverter};

/// One labelled line of a result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLine {
    pub label: String,
    pub value: String,
}

impl ResultLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Shared interface of all calculators.
pub trait Calculator {
    /// Validated, typed inputs
    type Input;
    /// Computed result record
    type Output: Serialize;

    /// Input fields, in display order
    fn fields(&self) -> Vec<FieldSpec>;

    /// Fields of each repeating row (empty for calculators without rows)
    fn row_fields(&self) -> &'static [FieldSpec] {
        &[]
    }

    /// Parse and range-check raw inputs, stopping at the first failure
    fn validate(&self, raw: &RawInputs) -> CalcResult<Self::Input>;

    /// Run the formula on validated inputs
    fn compute(&self, input: &Self::Input) -> CalcResult<Self::Output>;

    /// Labelled display lines for the result card
    fn present(&self, output: &Self::Output, settings: &Settings) -> Vec<ResultLine>;

    /// One-line summary used for clipboard export
    fn summary(&self, output: &Self::Output, settings: &Settings) -> String;
}

/// A presented result, independent of the calculator that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub calculator: CalculatorId,
    pub lines: Vec<ResultLine>,
    pub summary: String,
    /// The raw result record
    pub data: serde_json::Value,
}

/// Validate, compute and present in one step.
pub fn run<C: Calculator>(
    id: CalculatorId,
    calculator: &C,
    raw: &RawInputs,
    settings: &Settings,
) -> CalcResult<Evaluation> {
    let input = calculator.validate(raw)?;
    let output = calculator.compute(&input)?;
    let data = serde_json::to_value(&output).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    Ok(Evaluation {
        calculator: id,
        lines: calculator.present(&output, settings),
        summary: calculator.summary(&output, settings),
        data,
    })
}

/// Registry of every calculator in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorId {
    LengthConverter,
    WeightConverter,
    VolumeConverter,
    AreaConverter,
    SpeedConverter,
    TemperatureConverter,
    CurrencyConverter,
    SimpleInterest,
    CompoundInterest,
    LoanPayment,
    Bmi,
    HeartRateZones,
    StepsToCalories,
    Age,
    Gpa,
    Statistics,
    Percentage,
    TipSplit,
}

impl CalculatorId {
    pub const ALL: [CalculatorId; 18] = [
        CalculatorId::LengthConverter,
        CalculatorId::WeightConverter,
        CalculatorId::VolumeConverter,
        CalculatorId::AreaConverter,
        CalculatorId::SpeedConverter,
        CalculatorId::TemperatureConverter,
        CalculatorId::CurrencyConverter,
        CalculatorId::SimpleInterest,
        CalculatorId::CompoundInterest,
        CalculatorId::LoanPayment,
        CalculatorId::Bmi,
        CalculatorId::HeartRateZones,
        CalculatorId::StepsToCalories,
        CalculatorId::Age,
        CalculatorId::Gpa,
        CalculatorId::Statistics,
        CalculatorId::Percentage,
        CalculatorId::TipSplit,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            CalculatorId::LengthConverter => "Length Converter",
            CalculatorId::WeightConverter => "Weight Converter",
            CalculatorId::VolumeConverter => "Volume Converter",
            CalculatorId::AreaConverter => "Area Converter",
            CalculatorId::SpeedConverter => "Speed Converter",
            CalculatorId::TemperatureConverter => "Temperature Converter",
            CalculatorId::CurrencyConverter => "Currency Converter",
            CalculatorId::SimpleInterest => "Simple Interest",
            CalculatorId::CompoundInterest => "Compound Interest",
            CalculatorId::LoanPayment => "Loan Payment",
            CalculatorId::Bmi => "BMI",
            CalculatorId::HeartRateZones => "Heart Rate Zones",
            CalculatorId::StepsToCalories => "Steps to Calories",
            CalculatorId::Age => "Age",
            CalculatorId::Gpa => "GPA",
            CalculatorId::Statistics => "Descriptive Statistics",
            CalculatorId::Percentage => "Percentage",
            CalculatorId::TipSplit => "Tip Split",
        }
    }

    /// The unit quantity for unit converters
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            CalculatorId::LengthConverter => Some(Quantity::Length),
            CalculatorId::WeightConverter => Some(Quantity::Weight),
            CalculatorId::VolumeConverter => Some(Quantity::Volume),
            CalculatorId::AreaConverter => Some(Quantity::Area),
            CalculatorId::SpeedConverter => Some(Quantity::Speed),
            CalculatorId::TemperatureConverter => Some(Quantity::Temperature),
            _ => None,
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        if let Some(quantity) = self.quantity() {
            return UnitConverter::new(quantity).fields();
        }
        match self {
            CalculatorId::CurrencyConverter => CurrencyConverter.fields(),
            CalculatorId::SimpleInterest => simple_interest::SimpleInterest.fields(),
            CalculatorId::CompoundInterest => compound_interest::CompoundInterest.fields(),
            CalculatorId::LoanPayment => loan::LoanPayment.fields(),
            CalculatorId::Bmi => bmi::Bmi.fields(),
            CalculatorId::HeartRateZones => heart_rate::HeartRateZones.fields(),
            CalculatorId::StepsToCalories => steps_calories::StepsToCalories.fields(),
            CalculatorId::Age => age::AgeCalculator.fields(),
            CalculatorId::Gpa => gpa::GpaCalculator.fields(),
            CalculatorId::Statistics => statistics::Statistics.fields(),
            CalculatorId::Percentage => percentage::Percentage.fields(),
            CalculatorId::TipSplit => tip::TipSplit.fields(),
            _ => Vec::new(),
        }
    }

    pub fn row_fields(&self) -> &'static [FieldSpec] {
        match self {
            CalculatorId::Gpa => gpa::GpaCalculator.row_fields(),
            _ => &[],
        }
    }

    /// Raw inputs holding every field's default (and one default row, if the
    /// calculator has rows)
    pub fn default_inputs(&self) -> RawInputs {
        let mut raw = RawInputs::new();
        for spec in self.fields() {
            raw.fields.insert(spec.key.to_string(), spec.default.to_string());
        }
        if !self.row_fields().is_empty() {
            raw.rows.push(default_row(self.row_fields()));
        }
        raw
    }

    /// Validate, compute and present.
    pub fn evaluate(&self, raw: &RawInputs, settings: &Settings) -> CalcResult<Evaluation> {
        let id = *self;
        let outcome = match self {
            CalculatorId::LengthConverter
            | CalculatorId::WeightConverter
            | CalculatorId::VolumeConverter
            | CalculatorId::AreaConverter
            | CalculatorId::SpeedConverter
            | CalculatorId::TemperatureConverter => {
                let quantity = self.quantity().ok_or_else(|| CalcError::Internal {
                    message: format!("{:?} has no quantity", self),
                })?;
                run(id, &UnitConverter::new(quantity), raw, settings)
            }
            CalculatorId::CurrencyConverter => run(id, &CurrencyConverter, raw, settings),
            CalculatorId::SimpleInterest => run(id, &simple_interest::SimpleInterest, raw, settings),
            CalculatorId::CompoundInterest => run(id, &compound_interest::CompoundInterest, raw, settings),
            CalculatorId::LoanPayment => run(id, &loan::LoanPayment, raw, settings),
            CalculatorId::Bmi => run(id, &bmi::Bmi, raw, settings),
            CalculatorId::HeartRateZones => run(id, &heart_rate::HeartRateZones, raw, settings),
            CalculatorId::StepsToCalories => run(id, &steps_calories::StepsToCalories, raw, settings),
            CalculatorId::Age => run(id, &age::AgeCalculator, raw, settings),
            CalculatorId::Gpa => run(id, &gpa::GpaCalculator, raw, settings),
            CalculatorId::Statistics => run(id, &statistics::Statistics, raw, settings),
            CalculatorId::Percentage => run(id, &percentage::Percentage, raw, settings),
            CalculatorId::TipSplit => run(id, &tip::TipSplit, raw, settings),
        };

        match &outcome {
            Ok(_) => tracing::debug!(calculator = ?id, "evaluation succeeded"),
            Err(e) => tracing::debug!(calculator = ?id, code = e.error_code(), "evaluation rejected"),
        }
        outcome
    }
}

impl std::fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A row with every row field at its default
pub fn default_row(specs: &[FieldSpec]) -> std::collections::BTreeMap<String, String> {
    specs
        .iter()
        .map(|s| (s.key.to_string(), s.default.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::sanitize;

    #[test]
    fn test_field_defaults_pass_their_own_sanitizer() {
        for id in CalculatorId::ALL {
            for spec in id.fields().iter().chain(id.row_fields()) {
                assert!(
                    sanitize(&spec.kind, spec.default).is_some(),
                    "{:?}.{} default '{}' rejected",
                    id,
                    spec.key,
                    spec.default
                );
            }
        }
    }

    #[test]
    fn test_every_calculator_has_inputs() {
        for id in CalculatorId::ALL {
            let has_inputs = !id.fields().is_empty() || !id.row_fields().is_empty();
            assert!(has_inputs, "{:?} has no inputs", id);
        }
    }

    #[test]
    fn test_default_inputs_include_rows_only_for_gpa() {
        assert_eq!(CalculatorId::Gpa.default_inputs().rows.len(), 1);
        assert!(CalculatorId::Bmi.default_inputs().rows.is_empty());
    }

    #[test]
    fn test_evaluation_shape() {
        let raw = RawInputs::new()
            .with("value", "1")
            .with("from", "km")
            .with("to", "m");
        let eval = CalculatorId::LengthConverter.evaluate(&raw, &Settings::default()).unwrap();
        assert_eq!(eval.calculator, CalculatorId::LengthConverter);
        assert_eq!(eval.data["result"], 1000.0);
        assert!(!eval.lines.is_empty());
        assert_eq!(eval.summary, "1 km = 1000 m");
    }

    #[test]
    fn test_calculator_id_serialization() {
        let json = serde_json::to_string(&CalculatorId::HeartRateZones).unwrap();
        assert_eq!(json, "\"heart_rate_zones\"");
    }
}
