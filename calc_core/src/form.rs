//! # Form State
//!
//! Per-calculator interaction state: raw field text, optional course rows,
//! the current error or result, and the "Copied!" timestamp.
//!
//! - Edits pass through the field's sanitizer. An accepted edit clears the
//!   result and the error; a rejected one changes nothing.
//! - [`FormState::compute`] sets either a result or an error, never both.
//! - [`FormState::reset`] restores every field to its default.
//! - Copying is best effort: a clipboard failure is logged and dropped.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculatorId;
//! use calc_core::config::Settings;
//! use calc_core::form::FormState;
//!
//! let mut form = FormState::new(CalculatorId::TemperatureConverter);
//! assert!(form.set_field("value", "100"));
//! assert!(!form.set_field("value", "100x"));
//! form.set_field("from", "c");
//! form.set_field("to", "f");
//! form.compute(&Settings::default());
//! assert_eq!(form.result().unwrap().summary, "100 °C = 212 °F");
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::calculations::{default_row, CalculatorId, Evaluation};
use crate::config::Settings;
use crate::errors::CalcResult;
use crate::inputs::{FieldSpec, RawInputs};

/// Destination for copied result summaries.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> CalcResult<()>;
}

/// Interaction state of one calculator form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    calculator: CalculatorId,
    inputs: RawInputs,
    error: Option<String>,
    result: Option<Evaluation>,
    copied_at: Option<DateTime<Utc>>,
}

impl FormState {
    pub fn new(calculator: CalculatorId) -> Self {
        Self {
            calculator,
            inputs: calculator.default_inputs(),
            error: None,
            result: None,
            copied_at: None,
        }
    }

    pub fn calculator(&self) -> CalculatorId {
        self.calculator
    }

    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    /// Current text of a field
    pub fn value(&self, key: &str) -> &str {
        self.inputs.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn rows(&self) -> &[BTreeMap<String, String>] {
        &self.inputs.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&Evaluation> {
        self.result.as_ref()
    }

    fn invalidate(&mut self) {
        self.error = None;
        self.result = None;
        self.copied_at = None;
    }

    fn field_spec(&self, key: &str) -> Option<FieldSpec> {
        self.calculator.fields().into_iter().find(|s| s.key == key)
    }

    /// Apply an edit to a field.
    ///
    /// Returns `false` (and leaves all state untouched) when the field is
    /// unknown or the sanitizer rejects the candidate text.
    pub fn set_field(&mut self, key: &str, candidate: &str) -> bool {
        let Some(spec) = self.field_spec(key) else {
            tracing::debug!(calculator = ?self.calculator, key, "edit to unknown field ignored");
            return false;
        };
        match spec.sanitize(candidate) {
            Some(value) => {
                self.inputs.fields.insert(key.to_string(), value);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Apply an edit to one field of a course row.
    pub fn set_row_field(&mut self, index: usize, key: &str, candidate: &str) -> bool {
        let Some(spec) = self.calculator.row_fields().iter().find(|s| s.key == key) else {
            return false;
        };
        let Some(value) = spec.sanitize(candidate) else {
            return false;
        };
        match self.inputs.rows.get_mut(index) {
            Some(row) => {
                row.insert(key.to_string(), value);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Append a row with default values. No-op for calculators without rows.
    pub fn add_row(&mut self) -> bool {
        let specs = self.calculator.row_fields();
        if specs.is_empty() {
            return false;
        }
        self.inputs.rows.push(default_row(specs));
        self.invalidate();
        true
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.inputs.rows.len() <= 1 || index >= self.inputs.rows.len() {
            return false;
        }
        self.inputs.rows.remove(index);
        self.invalidate();
        true
    }

    /// Validate and compute from the current inputs.
    ///
    /// Returns `true` when a result was produced.
    pub fn compute(&mut self, settings: &Settings) -> bool {
        self.copied_at = None;
        match self.calculator.evaluate(&self.inputs, settings) {
            Ok(evaluation) => {
                self.result = Some(evaluation);
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.result = None;
                false
            }
        }
    }

    /// Restore defaults and clear the result, error and copy flag.
    pub fn reset(&mut self) {
        *self = FormState::new(self.calculator);
    }

    /// Copy the result summary.
    ///
    /// Returns `true` on success. Failures are logged and otherwise ignored;
    /// the displayed result is not affected.
    pub fn copy_result(&mut self, clipboard: &mut impl Clipboard, now: DateTime<Utc>) -> bool {
        let Some(result) = &self.result else {
            return false;
        };
        match clipboard.write_text(&result.summary) {
            Ok(()) => {
                self.copied_at = Some(now);
                true
            }
            Err(e) => {
                tracing::warn!(calculator = ?self.calculator, error = %e, "clipboard write failed");
                false
            }
        }
    }

    /// Whether the "Copied!" confirmation should be visible at `now`
    pub fn is_copied(&self, now: DateTime<Utc>, settings: &Settings) -> bool {
        let window = Duration::milliseconds(settings.copy_feedback_ms as i64);
        self.copied_at
            .is_some_and(|at| now >= at && now - at < window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[derive(Default)]
    struct MemoryClipboard {
        text: Option<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> CalcResult<()> {
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> CalcResult<()> {
            Err(CalcError::Internal {
                message: "denied".to_string(),
            })
        }
    }

    fn interest_form() -> FormState {
        let mut form = FormState::new(CalculatorId::SimpleInterest);
        form.set_field("principal", "1000");
        form.set_field("rate", "10");
        form.set_field("time", "1");
        form
    }

    #[test]
    fn test_rejected_keystroke_keeps_value() {
        let mut form = interest_form();
        assert!(!form.set_field("principal", "1000a"));
        assert!(!form.set_field("principal", "-1000"));
        assert_eq!(form.value("principal"), "1000");
        assert!(!form.set_field("nonexistent", "1"));
    }

    #[test]
    fn test_compute_success_then_edit_clears() {
        let mut form = interest_form();
        assert!(form.compute(&Settings::default()));
        assert!(form.result().is_some());
        assert!(form.error().is_none());

        form.set_field("rate", "5");
        assert!(form.result().is_none());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_compute_failure_sets_error_only() {
        let mut form = interest_form();
        form.compute(&Settings::default());
        form.set_field("time", "");
        assert!(!form.compute(&Settings::default()));
        assert_eq!(form.error(), Some("Please enter a valid time period"));
        assert!(form.result().is_none());
        // Input is preserved for correction
        assert_eq!(form.value("principal"), "1000");
    }

    #[test]
    fn test_reset() {
        let mut form = interest_form();
        form.compute(&Settings::default());
        form.reset();
        assert_eq!(form, FormState::new(CalculatorId::SimpleInterest));
        assert_eq!(form.value("time_unit"), "years");
    }

    #[test]
    fn test_copy_flag_expires() {
        let settings = Settings::default();
        let mut form = interest_form();
        let mut clipboard = MemoryClipboard::default();
        let t0 = Utc::now();

        // Nothing to copy yet
        assert!(!form.copy_result(&mut clipboard, t0));

        form.compute(&settings);
        assert!(form.copy_result(&mut clipboard, t0));
        assert_eq!(clipboard.text.as_deref(), Some(form.result().unwrap().summary.as_str()));
        assert!(form.is_copied(t0 + Duration::milliseconds(1000), &settings));
        assert!(!form.is_copied(t0 + Duration::milliseconds(1200), &settings));
    }

    #[test]
    fn test_clipboard_failure_is_swallowed() {
        let settings = Settings::default();
        let mut form = interest_form();
        form.compute(&settings);
        let before = form.result().cloned();

        assert!(!form.copy_result(&mut BrokenClipboard, Utc::now()));
        assert_eq!(form.result().cloned(), before);
        assert!(form.error().is_none());
        assert!(!form.is_copied(Utc::now(), &settings));
    }

    #[test]
    fn test_gpa_rows() {
        let mut form = FormState::new(CalculatorId::Gpa);
        assert_eq!(form.rows().len(), 1);
        assert!(!form.remove_row(0), "last row must stay");

        assert!(form.add_row());
        assert!(form.set_row_field(1, "grade", "B"));
        assert!(!form.set_row_field(1, "grade", "Q"));
        assert!(!form.set_row_field(5, "grade", "B"));
        assert!(form.compute(&Settings::default()));
        assert_eq!(form.result().unwrap().lines[0].value, "3.50");

        assert!(form.remove_row(0));
        assert!(form.result().is_none());
        assert_eq!(form.rows()[0]["grade"], "B");
    }

    #[test]
    fn test_rows_unsupported() {
        let mut form = FormState::new(CalculatorId::Bmi);
        assert!(!form.add_row());
        assert!(form.rows().is_empty());
    }
}
