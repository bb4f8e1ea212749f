//! # Heart Rate Zones (Karvonen Method)
//!
//! ```text
//! max_hr       = round(220 − age)
//! zone(i)      = round((max_hr − resting_hr) × i + resting_hr)
//! moderate     = [zone(0.50), zone(0.70)]
//! vigorous     = [zone(0.70), zone(0.85)]
//! ```
//!
//! Each bound is rounded independently. Age is clamped to 5..=120 and the
//! resting rate (70 when left blank) to 30..=140.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::inputs::{FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

pub const AGE_RANGE: (f64, f64) = (5.0, 120.0);
pub const RESTING_HR_RANGE: (f64, f64) = (30.0, 140.0);
pub const DEFAULT_RESTING_HR: f64 = 70.0;

pub const MODERATE_INTENSITY: (f64, f64) = (0.50, 0.70);
pub const VIGOROUS_INTENSITY: (f64, f64) = (0.70, 0.85);

const FIELDS: [FieldSpec; 2] = [
    FieldSpec::new("age", "Age (years)", FieldKind::Decimal).placeholder("30"),
    FieldSpec::new("resting_hr", "Resting Heart Rate (bpm)", FieldKind::Decimal).placeholder("70"),
];

/// Validated inputs (after clamping).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateInput {
    pub age: f64,
    pub resting_hr: f64,
}

impl HeartRateInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let age = raw.number("age", "age")?;
        if age <= 0.0 {
            return Err(CalcError::invalid_input("age", age.to_string(), "Please enter a valid age"));
        }
        let resting_hr = match raw.optional_number("resting_hr", "resting heart rate")? {
            Some(hr) if hr <= 0.0 => {
                return Err(CalcError::invalid_input(
                    "resting_hr",
                    hr.to_string(),
                    "Please enter a valid resting heart rate",
                ))
            }
            Some(hr) => hr,
            None => DEFAULT_RESTING_HR,
        };

        Ok(HeartRateInput {
            age: age.clamp(AGE_RANGE.0, AGE_RANGE.1),
            resting_hr: resting_hr.clamp(RESTING_HR_RANGE.0, RESTING_HR_RANGE.1),
        })
    }
}

/// An inclusive bpm range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub low_bpm: f64,
    pub high_bpm: f64,
}

/// Heart rate zone results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateResult {
    pub age: f64,
    pub resting_hr: f64,
    pub max_hr: f64,
    /// max_hr − resting_hr
    pub heart_rate_reserve: f64,
    pub moderate: Zone,
    pub vigorous: Zone,
}

/// Karvonen target rate for one intensity
pub fn zone_bound(max_hr: f64, resting_hr: f64, intensity: f64) -> f64 {
    ((max_hr - resting_hr) * intensity + resting_hr).round()
}

/// Calculate heart rate zones.
///
/// Any clamped input produces zones. A resting rate above the maximum gives a
/// negative reserve, and the bounds then descend with intensity.
pub fn calculate(input: &HeartRateInput) -> CalcResult<HeartRateResult> {
    let max_hr = (220.0 - input.age).round();

    let zone = |(low, high): (f64, f64)| Zone {
        low_bpm: zone_bound(max_hr, input.resting_hr, low),
        high_bpm: zone_bound(max_hr, input.resting_hr, high),
    };

    Ok(HeartRateResult {
        age: input.age,
        resting_hr: input.resting_hr,
        max_hr,
        heart_rate_reserve: max_hr - input.resting_hr,
        moderate: zone(MODERATE_INTENSITY),
        vigorous: zone(VIGOROUS_INTENSITY),
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeartRateZones;

impl Calculator for HeartRateZones {
    type Input = HeartRateInput;
    type Output = HeartRateResult;

    fn fields(&self) -> Vec<FieldSpec> {
        FIELDS.to_vec()
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<HeartRateInput> {
        HeartRateInput::from_raw(raw)
    }

    fn compute(&self, input: &HeartRateInput) -> CalcResult<HeartRateResult> {
        calculate(input)
    }

    fn present(&self, r: &HeartRateResult, _settings: &Settings) -> Vec<ResultLine> {
        vec![
            ResultLine::new("Maximum Heart Rate", format!("{:.0} bpm", r.max_hr)),
            ResultLine::new("Resting Heart Rate", format!("{:.0} bpm", r.resting_hr)),
            ResultLine::new(
                "Moderate (50-70%)",
                format!("{:.0}-{:.0} bpm", r.moderate.low_bpm, r.moderate.high_bpm),
            ),
            ResultLine::new(
                "Vigorous (70-85%)",
                format!("{:.0}-{:.0} bpm", r.vigorous.low_bpm, r.vigorous.high_bpm),
            ),
        ]
    }

    fn summary(&self, r: &HeartRateResult, _settings: &Settings) -> String {
        format!(
            "Max HR: {:.0} bpm, Moderate: {:.0}-{:.0} bpm, Vigorous: {:.0}-{:.0} bpm",
            r.max_hr, r.moderate.low_bpm, r.moderate.high_bpm, r.vigorous.low_bpm, r.vigorous.high_bpm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(age: &str, resting: &str) -> CalcResult<HeartRateResult> {
        let raw = RawInputs::new().with("age", age).with("resting_hr", resting);
        calculate(&HeartRateInput::from_raw(&raw)?)
    }

    #[test]
    fn test_age_30_resting_70() {
        let r = zones("30", "70").unwrap();
        assert_eq!(r.max_hr, 190.0);
        assert_eq!(r.moderate, Zone { low_bpm: 130.0, high_bpm: 154.0 });
        assert_eq!(r.vigorous, Zone { low_bpm: 154.0, high_bpm: 172.0 });
    }

    #[test]
    fn test_blank_resting_defaults_to_70() {
        assert_eq!(zones("30", "").unwrap(), zones("30", "70").unwrap());
    }

    #[test]
    fn test_clamping() {
        let r = zones("2", "10").unwrap();
        assert_eq!(r.age, 5.0);
        assert_eq!(r.resting_hr, 30.0);
        assert_eq!(r.max_hr, 215.0);

        let r = zones("150", "60").unwrap();
        assert_eq!(r.age, 120.0);
        assert_eq!(r.max_hr, 100.0);
    }

    #[test]
    fn test_resting_above_max_still_follows_formula() {
        let r = zones("120", "140").unwrap();
        assert_eq!(r.max_hr, 100.0);
        assert_eq!(r.heart_rate_reserve, -40.0);
        assert_eq!(r.moderate, Zone { low_bpm: 120.0, high_bpm: 112.0 });
        assert_eq!(r.vigorous, Zone { low_bpm: 112.0, high_bpm: 106.0 });
    }

    #[test]
    fn test_invalid_age() {
        assert_eq!(zones("", "70").unwrap_err().user_message(), "Please enter a valid age");
        assert_eq!(zones("0", "70").unwrap_err().user_message(), "Please enter a valid age");
    }

    #[test]
    fn test_summary() {
        let r = zones("30", "70").unwrap();
        assert_eq!(
            HeartRateZones.summary(&r, &Settings::default()),
            "Max HR: 190 bpm, Moderate: 130-154 bpm, Vigorous: 154-172 bpm"
        );
    }
}
