//! # Settings
//!
//! Display and interaction settings shared by every calculator. Settings are
//! plain JSON; any field left out of a settings file falls back to its
//! default.
//!
//! ```json
//! {
//!   "conversion_digits": 6,
//!   "money_digits": 2,
//!   "statistics_digits": 4,
//!   "copy_feedback_ms": 1200
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default fractional digits shown for converted magnitudes
pub const DEFAULT_CONVERSION_DIGITS: usize = 6;

/// How long the "Copied!" flag stays up after a successful copy
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 1200;

/// Display and interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum fractional digits for unit and currency conversions
    /// (trailing zeros are trimmed)
    pub conversion_digits: usize,

    /// Fixed fractional digits for money amounts
    pub money_digits: usize,

    /// Maximum fractional digits for statistics output
    pub statistics_digits: usize,

    /// Milliseconds the copy confirmation stays visible
    pub copy_feedback_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            conversion_digits: DEFAULT_CONVERSION_DIGITS,
            money_digits: 2,
            statistics_digits: 4,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// * `CalcError::FileError` - the file could not be read
    /// * `CalcError::SerializationError` - the file is not valid settings JSON
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Self::from_json(&contents)
    }

    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.conversion_digits, 6);
        assert_eq!(s.money_digits, 2);
        assert_eq!(s.copy_feedback_ms, 1200);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "conversion_digits": 10 }"#).unwrap();
        assert_eq!(s.conversion_digits, 10);
        assert_eq!(s.statistics_digits, 4);
        assert_eq!(s.copy_feedback_ms, 1200);
    }

    #[test]
    fn test_invalid_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/calcfolio/settings.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
