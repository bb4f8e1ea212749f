//! # Input Model
//!
//! Calculator inputs are kept as strings so partially typed values can be
//! shown before they are committed. Each field carries a [`FieldKind`] that
//! decides which keystrokes are accepted; typed parsing happens later, in
//! each calculator's validator.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::inputs::{sanitize, FieldKind, RawInputs};
//!
//! assert_eq!(sanitize(&FieldKind::Decimal, "12.5"), Some("12.5".to_string()));
//! assert_eq!(sanitize(&FieldKind::Decimal, "12.5."), None);
//! assert_eq!(sanitize(&FieldKind::Decimal, "-3"), None);
//!
//! let raw = RawInputs::new().with("principal", "1000");
//! assert_eq!(raw.number("principal", "principal amount").unwrap(), 1000.0);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::currency;
use crate::errors::{CalcError, CalcResult};
use crate::units::Quantity;

// Keystroke grammars (ASCII digits only)
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap());
static SIGNED_DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*$").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9-]{0,10}$").unwrap());

/// One selectable option of an enumerated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub key: &'static str,
    pub label: &'static str,
}

impl ChoiceOption {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

impl std::fmt::Display for ChoiceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// The grammar a field's text is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Digits with at most one decimal point, no sign
    Decimal,
    /// Like `Decimal` with an optional leading minus sign
    SignedDecimal,
    /// Digits only
    Integer,
    /// ISO date (`YYYY-MM-DD`) being typed
    Date,
    /// Free text (course names, number lists)
    Text,
    /// One of a fixed set of options
    Choice(&'static [ChoiceOption]),
    /// A unit key of the given quantity
    Unit(Quantity),
    /// A currency code from the static rate table
    Currency,
}

/// Description of one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key used in [`RawInputs`]
    pub key: &'static str,
    /// Label shown next to the field
    pub label: &'static str,
    pub kind: FieldKind,
    /// Hint text for empty fields
    pub placeholder: &'static str,
    /// Initial value (and value restored on reset)
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            placeholder: "",
            default: "",
        }
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub const fn default_value(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    /// Options for enumerated fields (empty for free-form fields)
    pub fn options(&self) -> Vec<ChoiceOption> {
        match self.kind {
            FieldKind::Choice(options) => options.to_vec(),
            FieldKind::Unit(quantity) => quantity
                .table()
                .units
                .iter()
                .map(|u| ChoiceOption::new(u.key, u.label))
                .collect(),
            FieldKind::Currency => currency::CURRENCIES
                .iter()
                .map(|c| ChoiceOption::new(c.code, c.name))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Apply this field's sanitizer to a candidate value
    pub fn sanitize(&self, candidate: &str) -> Option<String> {
        sanitize(&self.kind, candidate)
    }
}

/// Accept or reject a field's complete candidate text after a keystroke.
///
/// Returns the value to store, or `None` if the keystroke must be dropped.
pub fn sanitize(kind: &FieldKind, candidate: &str) -> Option<String> {
    let accepted = match kind {
        FieldKind::Decimal => DECIMAL.is_match(candidate),
        FieldKind::SignedDecimal => SIGNED_DECIMAL.is_match(candidate),
        FieldKind::Integer => INTEGER.is_match(candidate),
        FieldKind::Date => DATE.is_match(candidate),
        FieldKind::Text => true,
        FieldKind::Choice(options) => options.iter().any(|o| o.key == candidate),
        FieldKind::Unit(quantity) => quantity.table().find(candidate).is_some(),
        FieldKind::Currency => currency::find(candidate).is_some(),
    };
    accepted.then(|| candidate.to_string())
}

/// Raw, untyped field values for one calculator invocation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fields": { "principal": "1000", "rate": "10", "time": "1", "time_unit": "years" },
///   "rows": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,

    /// Repeating rows (GPA courses)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<BTreeMap<String, String>>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builder-style row append
    pub fn with_row<K, V>(mut self, row: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.rows
            .push(row.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Trimmed field text, empty if absent
    pub fn text(&self, key: &str) -> &str {
        field_text(&self.fields, key)
    }

    /// Parse a required numeric field.
    ///
    /// `label` is the human name used in the error message.
    pub fn number(&self, key: &str, label: &str) -> CalcResult<f64> {
        parse_number(&self.fields, key, label)
    }

    /// Parse an optional numeric field; empty means `None`
    pub fn optional_number(&self, key: &str, label: &str) -> CalcResult<Option<f64>> {
        if self.text(key).is_empty() {
            Ok(None)
        } else {
            self.number(key, label).map(Some)
        }
    }

    /// Look up a required enumerated field
    pub fn choice(&self, key: &str, label: &str, options: &[ChoiceOption]) -> CalcResult<&str> {
        let value = self.text(key);
        if value.is_empty() {
            return Err(CalcError::missing_field(label));
        }
        if options.iter().any(|o| o.key == value) {
            Ok(value)
        } else {
            Err(CalcError::invalid_input(key, value, format!("Please select a valid {}", label)))
        }
    }
}

/// Trimmed value of `key` in a field map, empty if absent
pub fn field_text<'a>(fields: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    fields.get(key).map(|s| s.trim()).unwrap_or("")
}

/// Parse a finite number from a field map.
///
/// Empty and non-numeric text are both reported as an invalid value.
pub fn parse_number(fields: &BTreeMap<String, String>, key: &str, label: &str) -> CalcResult<f64> {
    let text = field_text(fields, key);
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::invalid_input(key, text, format!("Please enter a valid {}", label))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_grammar() {
        for ok in ["", "0", "12", "12.", ".5", "12.50"] {
            assert!(sanitize(&FieldKind::Decimal, ok).is_some(), "{ok} should pass");
        }
        for bad in ["-1", "1.2.3", "1e5", "abc", "1,000", " 1"] {
            assert!(sanitize(&FieldKind::Decimal, bad).is_none(), "{bad} should fail");
        }
    }

    #[test]
    fn test_signed_decimal_grammar() {
        assert!(sanitize(&FieldKind::SignedDecimal, "-").is_some());
        assert!(sanitize(&FieldKind::SignedDecimal, "-40.5").is_some());
        assert!(sanitize(&FieldKind::SignedDecimal, "--4").is_none());
        assert!(sanitize(&FieldKind::SignedDecimal, "4-").is_none());
    }

    #[test]
    fn test_integer_and_date_grammar() {
        assert!(sanitize(&FieldKind::Integer, "42").is_some());
        assert!(sanitize(&FieldKind::Integer, "4.2").is_none());
        assert!(sanitize(&FieldKind::Date, "2000-02-29").is_some());
        assert!(sanitize(&FieldKind::Date, "2000-02-291").is_none());
        assert!(sanitize(&FieldKind::Date, "2000/02/29").is_none());
    }

    #[test]
    fn test_grammars_reject_non_ascii_digits_and_trailing_newline() {
        for kind in [FieldKind::Decimal, FieldKind::SignedDecimal, FieldKind::Integer, FieldKind::Date] {
            assert!(sanitize(&kind, "١٢").is_none(), "{kind:?}");
            assert!(sanitize(&kind, "12\n").is_none(), "{kind:?}");
        }
    }

    #[test]
    fn test_choice_and_unit_fields() {
        const OPTIONS: &[ChoiceOption] = &[ChoiceOption::new("kg", "Kilograms"), ChoiceOption::new("lb", "Pounds")];
        assert!(sanitize(&FieldKind::Choice(OPTIONS), "lb").is_some());
        assert!(sanitize(&FieldKind::Choice(OPTIONS), "st").is_none());
        assert!(sanitize(&FieldKind::Unit(Quantity::Length), "ft").is_some());
        assert!(sanitize(&FieldKind::Unit(Quantity::Length), "kg").is_none());
        assert!(sanitize(&FieldKind::Currency, "EUR").is_some());
    }

    #[test]
    fn test_number_parsing() {
        let raw = RawInputs::new().with("a", " 12.5 ").with("b", "").with("c", "abc");
        assert_eq!(raw.number("a", "amount").unwrap(), 12.5);

        let err = raw.number("b", "amount").unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid amount");
        assert_eq!(err.field(), Some("b"));

        assert!(raw.number("c", "amount").is_err());
        assert!(raw.number("missing", "amount").is_err());
        assert_eq!(raw.optional_number("b", "amount").unwrap(), None);
    }

    #[test]
    fn test_unit_field_options() {
        let spec = FieldSpec::new("from", "From", FieldKind::Unit(Quantity::Temperature));
        let keys: Vec<_> = spec.options().iter().map(|o| o.key).collect();
        assert_eq!(keys, vec!["c", "f", "k"]);
    }

    #[test]
    fn test_raw_inputs_json() {
        let raw = RawInputs::new()
            .with("data", "1,2")
            .with_row([("grade", "A"), ("credits", "3")]);
        let json = serde_json::to_string(&raw).unwrap();
        let roundtrip: RawInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(raw, roundtrip);

        let fields_only: RawInputs = serde_json::from_str(r#"{"fields":{"x":"1"}}"#).unwrap();
        assert!(fields_only.rows.is_empty());
    }
}
