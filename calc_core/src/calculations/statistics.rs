//! # Descriptive Statistics
//!
//! Batch reduction over a free-text list of numbers. Tokens are split on
//! commas, semicolons and whitespace; tokens that do not parse as finite
//! numbers are dropped.
//!
//! ```text
//! mean     = Σx / n
//! variance = Σ(x − mean)² / n        (population)
//!          = Σ(x − mean)² / (n − 1)  (sample, 0 when n = 1)
//! std_dev  = √variance
//! ```
//!
//! Every value tied at the highest frequency is a mode. When every value
//! occurs exactly once there is no mode.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::statistics::{describe, parse_numbers, VarianceMode};
//!
//! let data = parse_numbers("1, 2; 2\n3 abc");
//! let stats = describe(&data, VarianceMode::Population).unwrap();
//! assert_eq!(stats.count, 4);
//! assert_eq!(stats.median, 2.0);
//! assert_eq!(stats.modes, vec![2.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

const MODES: &[ChoiceOption] = &[
    ChoiceOption::new("population", "Population"),
    ChoiceOption::new("sample", "Sample"),
];

const FIELDS: [FieldSpec; 2] = [
    FieldSpec::new("data", "Numbers", FieldKind::Text).placeholder("1, 2, 3, 4"),
    FieldSpec::new("mode", "Variance", FieldKind::Choice(MODES)).default_value("population"),
];

/// Divisor used for the variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VarianceMode {
    /// Divide by `n`
    #[default]
    Population,
    /// Divide by `n − 1`
    Sample,
}

impl VarianceMode {
    pub fn from_key(key: &str) -> Option<VarianceMode> {
        match key {
            "population" => Some(VarianceMode::Population),
            "sample" => Some(VarianceMode::Sample),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VarianceMode::Population => "Population",
            VarianceMode::Sample => "Sample",
        }
    }
}

/// Extract every finite number from free text
pub fn parse_numbers(text: &str) -> Vec<f64> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Parsed data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsInput {
    pub data: Vec<f64>,
    pub mode: VarianceMode,
}

impl StatisticsInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let data = parse_numbers(raw.text("data"));
        if data.is_empty() {
            return Err(CalcError::no_data("Please enter at least one valid number"));
        }
        let mode = match raw.text("mode") {
            "" => VarianceMode::default(),
            key => VarianceMode::from_key(key)
                .ok_or_else(|| CalcError::invalid_input("mode", key, "Please select a valid variance mode"))?,
        };
        Ok(StatisticsInput { data, mode })
    }
}

/// Summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub mode: VarianceMode,
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Ascending; empty when every value is unique
    pub modes: Vec<f64>,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub variance: f64,
    pub std_dev: f64,
}

/// Values tied at the highest frequency in a sorted slice
fn modes_of(sorted: &[f64]) -> Vec<f64> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &v in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == v => *count += 1,
            _ => runs.push((v, 1)),
        }
    }
    let max_freq = runs.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max_freq <= 1 {
        return Vec::new();
    }
    runs.into_iter()
        .filter(|(_, c)| *c == max_freq)
        .map(|(v, _)| v)
        .collect()
}

/// Median of a sorted, non-empty slice
fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        return sorted[n / 2];
    }
    let (a, b) = (sorted[n / 2 - 1], sorted[n / 2]);
    let mid = (a + b) / 2.0;
    if mid.is_finite() {
        mid
    } else {
        a / 2.0 + b / 2.0
    }
}

/// Describe a data set.
///
/// # Errors
///
/// * `NoData` - the slice is empty
/// * `OutOfPhysicalRange` - the sum or variance overflows
pub fn describe(data: &[f64], mode: VarianceMode) -> CalcResult<StatisticsResult> {
    if data.is_empty() {
        return Err(CalcError::no_data("Please enter at least one valid number"));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let mean = sum / n as f64;
    let median = median_of(&sorted);
    let min = sorted[0];
    let max = sorted[n - 1];

    let squared_deviations: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
    let variance = match mode {
        VarianceMode::Population => squared_deviations / n as f64,
        VarianceMode::Sample if n > 1 => squared_deviations / (n - 1) as f64,
        VarianceMode::Sample => 0.0,
    };
    if !sum.is_finite() || !variance.is_finite() {
        return Err(CalcError::out_of_physical_range("Result is too large to display"));
    }

    Ok(StatisticsResult {
        mode,
        count: n,
        sum,
        mean,
        median,
        modes: modes_of(&sorted),
        min,
        max,
        range: max - min,
        variance,
        std_dev: variance.sqrt(),
    })
}

pub fn calculate(input: &StatisticsInput) -> CalcResult<StatisticsResult> {
    describe(&input.data, input.mode)
}

/// Mode list for display, or "No mode"
pub fn format_modes(modes: &[f64], digits: usize) -> String {
    if modes.is_empty() {
        "No mode".to_string()
    } else {
        modes
            .iter()
            .map(|m| format::trimmed(*m, digits))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Statistics;

impl Calculator for Statistics {
    type Input = StatisticsInput;
    type Output = StatisticsResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<StatisticsInput> {
        StatisticsInput::from_raw(raw)
    }

    fn compute(&self, input: &StatisticsInput) -> CalcResult<StatisticsResult> {
        calculate(input)
    }

    fn present(&self, r: &StatisticsResult, settings: &Settings) -> Vec<ResultLine> {
        let d = settings.statistics_digits;
        vec![
            ResultLine::new("Count", r.count.to_string()),
            ResultLine::new("Sum", format::trimmed(r.sum, d)),
            ResultLine::new("Mean", format::trimmed(r.mean, d)),
            ResultLine::new("Median", format::trimmed(r.median, d)),
            ResultLine::new("Mode", format_modes(&r.modes, d)),
            ResultLine::new("Min", format::trimmed(r.min, d)),
            ResultLine::new("Max", format::trimmed(r.max, d)),
            ResultLine::new("Range", format::trimmed(r.range, d)),
            ResultLine::new(format!("Variance ({})", r.mode.display_name()), format::trimmed(r.variance, d)),
            ResultLine::new(format!("Std Dev ({})", r.mode.display_name()), format::trimmed(r.std_dev, d)),
        ]
    }

    fn summary(&self, r: &StatisticsResult, settings: &Settings) -> String {
        let d = settings.statistics_digits;
        format!(
            "Count: {}, Mean: {}, Median: {}, Mode: {}, Std Dev: {}",
            r.count,
            format::trimmed(r.mean, d),
            format::trimmed(r.median, d),
            format_modes(&r.modes, d),
            format::trimmed(r.std_dev, d)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population() {
        let r = describe(&parse_numbers("1,2,2,3"), VarianceMode::Population).unwrap();
        assert_eq!(r.count, 4);
        assert_eq!(r.mean, 2.0);
        assert_eq!(r.median, 2.0);
        assert_eq!(format_modes(&r.modes, 4), "2");
        assert_eq!(r.variance, 0.5);
        assert!((r.std_dev - 0.7071).abs() < 1e-4);
    }

    #[test]
    fn test_sample() {
        let r = describe(&parse_numbers("1,2,2,3"), VarianceMode::Sample).unwrap();
        assert!((r.variance - 0.6667).abs() < 1e-4);
        assert!((r.std_dev - 0.8165).abs() < 1e-4);
    }

    #[test]
    fn test_single_value_sample_variance_is_zero() {
        let r = describe(&[5.0], VarianceMode::Sample).unwrap();
        assert_eq!(r.variance, 0.0);
        assert_eq!(r.std_dev, 0.0);
    }

    #[test]
    fn test_odd_median_and_range() {
        let r = describe(&parse_numbers("9 1 5"), VarianceMode::Population).unwrap();
        assert_eq!(r.median, 5.0);
        assert_eq!(r.min, 1.0);
        assert_eq!(r.max, 9.0);
        assert_eq!(r.range, 8.0);
    }

    #[test]
    fn test_modes() {
        // All unique -> no mode
        let r = describe(&[1.0, 2.0, 3.0], VarianceMode::Population).unwrap();
        assert!(r.modes.is_empty());
        assert_eq!(format_modes(&r.modes, 4), "No mode");

        // Two pairs tied -> both are modes
        let r = describe(&[3.0, 1.0, 1.0, 3.0], VarianceMode::Population).unwrap();
        assert_eq!(r.modes, vec![1.0, 3.0]);
        assert_eq!(format_modes(&r.modes, 4), "1, 3");
    }

    #[test]
    fn test_parsing_drops_junk() {
        assert_eq!(parse_numbers("1;2\n\t3 , x, 4.5, -1, inf, NaN"), vec![1.0, 2.0, 3.0, 4.5, -1.0]);
        assert!(parse_numbers(" , ; ").is_empty());
    }

    #[test]
    fn test_no_numbers() {
        let err = StatisticsInput::from_raw(&RawInputs::new().with("data", "a b c")).unwrap_err();
        assert_eq!(err.error_code(), "NO_DATA");
        assert!(describe(&[], VarianceMode::Population).is_err());
    }

    #[test]
    fn test_median_of_huge_values_does_not_overflow() {
        assert_eq!(median_of(&[1e308, 1e308]), 1e308);
        assert_eq!(median_of(&[-1e308, 1e308]), 0.0);
        assert_eq!(median_of(&[1.0, 2.0]), 1.5);
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        let raw = RawInputs::new().with("data", "1e308 1e308");
        let err = calculate(&StatisticsInput::from_raw(&raw).unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_PHYSICAL_RANGE");
        assert_eq!(err.user_message(), "Result is too large to display");
    }

    #[test]
    fn test_summary() {
        let raw = RawInputs::new().with("data", "1,2,2,3").with("mode", "population");
        let r = calculate(&StatisticsInput::from_raw(&raw).unwrap()).unwrap();
        assert_eq!(
            Statistics.summary(&r, &Settings::default()),
            "Count: 4, Mean: 2, Median: 2, Mode: 2, Std Dev: 0.7071"
        );
    }
}
