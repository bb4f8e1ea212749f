//! # Unit and Currency Converters
//!
//! Thin calculator front ends over [`crate::units`] and [`crate::currency`].
//! Each converter takes a magnitude plus source and target keys from one
//! closed unit set.

use crate::config::Settings;
use crate::currency::{self, CurrencyConversion};
use crate::errors::CalcResult;
use crate::format;
use crate::inputs::{FieldKind, FieldSpec, RawInputs};
use crate::units::{Conversion, Quantity};

use super::{Calculator, ResultLine};

/// Validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub value: f64,
    pub from: String,
    pub to: String,
}

fn request(raw: &RawInputs, value_label: &str) -> CalcResult<ConversionRequest> {
    Ok(ConversionRequest {
        value: raw.number("value", value_label)?,
        from: raw.text("from").to_string(),
        to: raw.text("to").to_string(),
    })
}

/// Converter for one physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConverter {
    pub quantity: Quantity,
}

impl UnitConverter {
    pub fn new(quantity: Quantity) -> Self {
        Self { quantity }
    }

    /// Default (from, to) pair shown on a fresh form
    fn default_pair(&self) -> (&'static str, &'static str) {
        match self.quantity {
            Quantity::Length => ("m", "ft"),
            Quantity::Weight => ("kg", "lb"),
            Quantity::Volume => ("l", "gal"),
            Quantity::Area => ("m2", "ft2"),
            Quantity::Speed => ("kmh", "mph"),
            Quantity::Temperature => ("c", "f"),
        }
    }
}

impl Calculator for UnitConverter {
    type Input = ConversionRequest;
    type Output = Conversion;

    fn fields(&self) -> Vec<FieldSpec> {
        let value_kind = if self.quantity.allows_negative() {
            FieldKind::SignedDecimal
        } else {
            FieldKind::Decimal
        };
        let (from, to) = self.default_pair();
        vec![
            FieldSpec::new("value", "Value", value_kind).placeholder("Enter value"),
            FieldSpec::new("from", "From", FieldKind::Unit(self.quantity)).default_value(from),
            FieldSpec::new("to", "To", FieldKind::Unit(self.quantity)).default_value(to),
        ]
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<ConversionRequest> {
        request(raw, "value")
    }

    fn compute(&self, input: &ConversionRequest) -> CalcResult<Conversion> {
        self.quantity.convert(input.value, &input.from, &input.to)
    }

    fn present(&self, output: &Conversion, settings: &Settings) -> Vec<ResultLine> {
        let table = self.quantity.table();
        let label = |key: &str| table.find(key).map(|u| u.label).unwrap_or("");
        vec![
            ResultLine::new(
                label(&output.from),
                format!("{} {}", format::trimmed(output.value, settings.conversion_digits), output.from_symbol),
            ),
            ResultLine::new(
                label(&output.to),
                format!("{} {}", format::trimmed(output.result, settings.conversion_digits), output.to_symbol),
            ),
        ]
    }

    fn summary(&self, output: &Conversion, settings: &Settings) -> String {
        format!(
            "{} {} = {} {}",
            format::trimmed(output.value, settings.conversion_digits),
            output.from_symbol,
            format::trimmed(output.result, settings.conversion_digits),
            output.to_symbol
        )
    }
}

/// Converter over the static currency table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyConverter;

impl Calculator for CurrencyConverter {
    type Input = ConversionRequest;
    type Output = CurrencyConversion;

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("value", "Amount", FieldKind::Decimal).placeholder("100"),
            FieldSpec::new("from", "From", FieldKind::Currency).default_value("USD"),
            FieldSpec::new("to", "To", FieldKind::Currency).default_value("EUR"),
        ]
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<ConversionRequest> {
        request(raw, "amount")
    }

    fn compute(&self, input: &ConversionRequest) -> CalcResult<CurrencyConversion> {
        currency::convert(input.value, &input.from, &input.to)
    }

    fn present(&self, output: &CurrencyConversion, settings: &Settings) -> Vec<ResultLine> {
        vec![
            ResultLine::new("Amount", money(output.amount, &output.from, settings)),
            ResultLine::new("Converted", money(output.result, &output.to, settings)),
            ResultLine::new(
                "Rate",
                format!(
                    "1 {} = {} {}",
                    output.from,
                    format::trimmed(output.rate, settings.conversion_digits),
                    output.to
                ),
            ),
        ]
    }

    fn summary(&self, output: &CurrencyConversion, settings: &Settings) -> String {
        format!(
            "{} {} = {} {}",
            format::grouped(output.amount, settings.money_digits),
            output.from,
            format::grouped(output.result, settings.money_digits),
            output.to
        )
    }
}

fn money(value: f64, code: &str, settings: &Settings) -> String {
    let symbol = currency::find(code).map(|c| c.symbol).unwrap_or("");
    format::money(value, symbol, settings.money_digits)
}
