//! # Currency Rates
//!
//! A compiled-in sample rate table. Rates are expressed as units of each
//! currency per one US dollar, and conversions pivot through the dollar:
//!
//! ```text
//! result = amount / rate[from] × rate[to]
//! ```
//!
//! These are demonstration figures, not a live feed.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Reference currency every rate is quoted against
pub const REFERENCE_CODE: &str = "USD";

/// One entry of the rate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Currency {
    /// ISO 4217 code
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Units of this currency per 1 USD
    pub per_reference: f64,
}

impl Currency {
    const fn new(code: &'static str, name: &'static str, symbol: &'static str, per_reference: f64) -> Self {
        Self {
            code,
            name,
            symbol,
            per_reference,
        }
    }
}

pub static CURRENCIES: &[Currency] = &[
    Currency::new("USD", "US Dollar", "$", 1.0),
    Currency::new("EUR", "Euro", "€", 0.92),
    Currency::new("GBP", "British Pound", "£", 0.79),
    Currency::new("JPY", "Japanese Yen", "¥", 149.5),
    Currency::new("INR", "Indian Rupee", "₹", 83.2),
    Currency::new("CAD", "Canadian Dollar", "C$", 1.36),
    Currency::new("AUD", "Australian Dollar", "A$", 1.52),
    Currency::new("CHF", "Swiss Franc", "CHF", 0.88),
    Currency::new("CNY", "Chinese Yuan", "¥", 7.24),
    Currency::new("MXN", "Mexican Peso", "MX$", 17.1),
];

/// Look up a currency by code
pub fn find(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code == code)
}

fn lookup(code: &str) -> CalcResult<&'static Currency> {
    find(code).ok_or_else(|| CalcError::unknown_unit("currency", code))
}

/// Result of a currency conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
    /// Units of `to` per 1 unit of `from`
    pub rate: f64,
}

/// Convert an amount between two currencies.
///
/// # Errors
///
/// * `InvalidInput` - amount is negative or not finite
/// * `UnknownUnit` - either code is not in the table
pub fn convert(amount: f64, from: &str, to: &str) -> CalcResult<CurrencyConversion> {
    if !amount.is_finite() {
        return Err(CalcError::invalid_input("amount", amount.to_string(), "Please enter a valid amount"));
    }
    if amount < 0.0 {
        return Err(CalcError::invalid_input("amount", amount.to_string(), "Amount cannot be negative"));
    }
    let from_cur = lookup(from)?;
    let to_cur = lookup(to)?;

    Ok(CurrencyConversion {
        amount,
        from: from_cur.code.to_string(),
        to: to_cur.code.to_string(),
        result: amount / from_cur.per_reference * to_cur.per_reference,
        rate: to_cur.per_reference / from_cur.per_reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_currency_is_unity() {
        assert_eq!(find(REFERENCE_CODE).unwrap().per_reference, 1.0);
    }

    #[test]
    fn test_pivot_formula() {
        let c = convert(100.0, "EUR", "GBP").unwrap();
        assert_eq!(c.result, 100.0 / 0.92 * 0.79);

        let c = convert(50.0, "USD", "JPY").unwrap();
        assert_eq!(c.result, 7475.0);
    }

    #[test]
    fn test_same_currency() {
        let c = convert(42.0, "INR", "INR").unwrap();
        assert!((c.result - 42.0).abs() < 1e-9);
        assert!((c.rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(convert(-1.0, "USD", "EUR").unwrap_err().user_message(), "Amount cannot be negative");
        assert_eq!(convert(1.0, "USD", "XYZ").unwrap_err().error_code(), "UNKNOWN_UNIT");
    }
}
