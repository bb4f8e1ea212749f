//! # Unit Conversion Engine
//!
//! Table-driven conversion through a single canonical base unit per
//! quantity. A value is first brought to the base unit, then out to the
//! target unit, so no pairwise conversion table is needed:
//!
//! ```text
//! result = (value × factor[from]) / factor[to]
//! ```
//!
//! Units that are not a pure multiple of the base (temperature, and km/h
//! whose exact definition is a division by 3.6) carry an explicit pair of
//! functions instead of a factor.
//!
//! | Quantity    | Base unit |
//! |-------------|-----------|
//! | Length      | m         |
//! | Weight      | kg        |
//! | Volume      | L         |
//! | Area        | m²        |
//! | Speed       | m/s       |
//! | Temperature | °C        |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::Quantity;
//!
//! let c = Quantity::Length.convert(1.0, "mi", "km").unwrap();
//! assert!((c.result - 1.609344).abs() < 1e-12);
//!
//! let t = Quantity::Temperature.convert(100.0, "c", "f").unwrap();
//! assert_eq!(t.result, 212.0);
//!
//! assert!(Quantity::Temperature.convert(-10.0, "k", "c").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Slack allowed when checking a derived Kelvin value against zero, so that
/// exactly-absolute-zero inputs in °F survive float rounding.
const ABSOLUTE_ZERO_TOLERANCE: f64 = 1e-9;

/// How a unit maps onto its quantity's base unit.
#[derive(Debug, Clone, Copy)]
pub enum Scale {
    /// How many base units make up 1 of this unit
    Factor(f64),
    /// Explicit conversion into and out of the base unit
    Formula {
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    },
}

impl Scale {
    pub fn to_base(&self, value: f64) -> f64 {
        match self {
            Scale::Factor(factor) => value * factor,
            Scale::Formula { to_base, .. } => to_base(value),
        }
    }

    pub fn from_base(&self, base: f64) -> f64 {
        match self {
            Scale::Factor(factor) => base / factor,
            Scale::Formula { from_base, .. } => from_base(base),
        }
    }

    /// The multiplicative factor, if this is a factor-based unit
    pub fn factor(&self) -> Option<f64> {
        match self {
            Scale::Factor(factor) => Some(*factor),
            Scale::Formula { .. } => None,
        }
    }
}

/// A unit within one converter's closed unit set.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    /// Stable key (e.g. "ft")
    pub key: &'static str,
    /// Display label (e.g. "Feet")
    pub label: &'static str,
    /// Short symbol used in formatted output (e.g. "ft")
    pub symbol: &'static str,
    pub scale: Scale,
}

impl Unit {
    const fn factor(key: &'static str, label: &'static str, symbol: &'static str, factor: f64) -> Self {
        Self {
            key,
            label,
            symbol,
            scale: Scale::Factor(factor),
        }
    }

    const fn formula(
        key: &'static str,
        label: &'static str,
        symbol: &'static str,
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    ) -> Self {
        Self {
            key,
            label,
            symbol,
            scale: Scale::Formula { to_base, from_base },
        }
    }
}

/// The static unit set of one quantity.
#[derive(Debug)]
pub struct UnitTable {
    pub quantity: Quantity,
    /// Key of the canonical base unit
    pub base: &'static str,
    pub units: &'static [Unit],
}

impl UnitTable {
    /// Find a unit by key
    pub fn find(&self, key: &str) -> Option<&'static Unit> {
        self.units.iter().find(|u| u.key == key)
    }

    /// Find a unit by key, or report it as unknown
    pub fn unit(&self, key: &str) -> CalcResult<&'static Unit> {
        self.find(key)
            .ok_or_else(|| CalcError::unknown_unit(self.quantity.key(), key))
    }

    /// Pivot conversion with no domain checks
    pub fn convert_raw(&self, value: f64, from: &Unit, to: &Unit) -> f64 {
        to.scale.from_base(from.scale.to_base(value))
    }
}

// ============================================================================
// Unit Tables
// ============================================================================

pub static LENGTH: UnitTable = UnitTable {
    quantity: Quantity::Length,
    base: "m",
    units: &[
        Unit::factor("mm", "Millimeters", "mm", 0.001),
        Unit::factor("cm", "Centimeters", "cm", 0.01),
        Unit::factor("m", "Meters", "m", 1.0),
        Unit::factor("km", "Kilometers", "km", 1000.0),
        Unit::factor("in", "Inches", "in", 0.0254),
        Unit::factor("ft", "Feet", "ft", 0.3048),
        Unit::factor("yd", "Yards", "yd", 0.9144),
        Unit::factor("mi", "Miles", "mi", 1609.344),
        Unit::factor("nmi", "Nautical Miles", "nmi", 1852.0),
    ],
};

pub static WEIGHT: UnitTable = UnitTable {
    quantity: Quantity::Weight,
    base: "kg",
    units: &[
        Unit::factor("mg", "Milligrams", "mg", 0.000001),
        Unit::factor("g", "Grams", "g", 0.001),
        Unit::factor("kg", "Kilograms", "kg", 1.0),
        Unit::factor("t", "Metric Tons", "t", 1000.0),
        Unit::factor("oz", "Ounces", "oz", 0.028349523125),
        Unit::factor("lb", "Pounds", "lb", 0.45359237),
        Unit::factor("st", "Stones", "st", 6.35029318),
    ],
};

pub static VOLUME: UnitTable = UnitTable {
    quantity: Quantity::Volume,
    base: "l",
    units: &[
        Unit::factor("ml", "Milliliters", "mL", 0.001),
        Unit::factor("l", "Liters", "L", 1.0),
        Unit::factor("m3", "Cubic Meters", "m³", 1000.0),
        Unit::factor("tsp", "Teaspoons (US)", "tsp", 0.00492892159375),
        Unit::factor("tbsp", "Tablespoons (US)", "tbsp", 0.01478676478125),
        Unit::factor("floz", "Fluid Ounces (US)", "fl oz", 0.0295735295625),
        Unit::factor("cup", "Cups (US)", "cup", 0.2365882365),
        Unit::factor("pt", "Pints (US)", "pt", 0.473176473),
        Unit::factor("qt", "Quarts (US)", "qt", 0.946352946),
        Unit::factor("gal", "Gallons (US)", "gal", 3.785411784),
    ],
};

pub static AREA: UnitTable = UnitTable {
    quantity: Quantity::Area,
    base: "m2",
    units: &[
        Unit::factor("cm2", "Square Centimeters", "cm²", 0.0001),
        Unit::factor("m2", "Square Meters", "m²", 1.0),
        Unit::factor("ha", "Hectares", "ha", 10_000.0),
        Unit::factor("km2", "Square Kilometers", "km²", 1_000_000.0),
        Unit::factor("in2", "Square Inches", "in²", 0.00064516),
        Unit::factor("ft2", "Square Feet", "ft²", 0.09290304),
        Unit::factor("yd2", "Square Yards", "yd²", 0.83612736),
        Unit::factor("ac", "Acres", "ac", 4046.8564224),
        Unit::factor("mi2", "Square Miles", "mi²", 2_589_988.110336),
    ],
};

fn kmh_to_mps(v: f64) -> f64 {
    v / 3.6
}

fn mps_to_kmh(v: f64) -> f64 {
    v * 3.6
}

pub static SPEED: UnitTable = UnitTable {
    quantity: Quantity::Speed,
    base: "mps",
    units: &[
        Unit::factor("mps", "Meters per Second", "m/s", 1.0),
        Unit::formula("kmh", "Kilometers per Hour", "km/h", kmh_to_mps, mps_to_kmh),
        Unit::factor("mph", "Miles per Hour", "mph", 0.44704),
        Unit::factor("knot", "Knots", "kn", 0.514444),
        Unit::factor("fps", "Feet per Second", "ft/s", 0.3048),
    ],
};

fn identity(v: f64) -> f64 {
    v
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

pub static TEMPERATURE: UnitTable = UnitTable {
    quantity: Quantity::Temperature,
    base: "c",
    units: &[
        Unit::formula("c", "Celsius", "°C", identity, identity),
        Unit::formula("f", "Fahrenheit", "°F", fahrenheit_to_celsius, celsius_to_fahrenheit),
        Unit::formula("k", "Kelvin", "K", kelvin_to_celsius, celsius_to_kelvin),
    ],
};

// ============================================================================
// Quantities
// ============================================================================

/// A physical quantity with its own closed unit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Length,
    Weight,
    Volume,
    Area,
    Speed,
    Temperature,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::Length,
        Quantity::Weight,
        Quantity::Volume,
        Quantity::Area,
        Quantity::Speed,
        Quantity::Temperature,
    ];

    /// Stable lowercase key
    pub fn key(&self) -> &'static str {
        match self {
            Quantity::Length => "length",
            Quantity::Weight => "weight",
            Quantity::Volume => "volume",
            Quantity::Area => "area",
            Quantity::Speed => "speed",
            Quantity::Temperature => "temperature",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Quantity::Length => "Length",
            Quantity::Weight => "Weight",
            Quantity::Volume => "Volume",
            Quantity::Area => "Area",
            Quantity::Speed => "Speed",
            Quantity::Temperature => "Temperature",
        }
    }

    pub fn from_key(key: &str) -> Option<Quantity> {
        Quantity::ALL.into_iter().find(|q| q.key() == key)
    }

    pub fn table(&self) -> &'static UnitTable {
        match self {
            Quantity::Length => &LENGTH,
            Quantity::Weight => &WEIGHT,
            Quantity::Volume => &VOLUME,
            Quantity::Area => &AREA,
            Quantity::Speed => &SPEED,
            Quantity::Temperature => &TEMPERATURE,
        }
    }

    /// Only temperature admits negative magnitudes
    pub fn allows_negative(&self) -> bool {
        matches!(self, Quantity::Temperature)
    }

    /// Convert `value` between two units of this quantity.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - value is not finite, or negative where the quantity forbids it
    /// * `UnknownUnit` - either key is not in this quantity's unit set
    /// * `OutOfPhysicalRange` - temperature falls below absolute zero
    pub fn convert(&self, value: f64, from: &str, to: &str) -> CalcResult<Conversion> {
        if !value.is_finite() {
            return Err(CalcError::invalid_input("value", value.to_string(), "Please enter a valid value"));
        }
        let table = self.table();
        let from_unit = table.unit(from)?;
        let to_unit = table.unit(to)?;

        if !self.allows_negative() && value < 0.0 {
            return Err(CalcError::invalid_input(
                "value",
                value.to_string(),
                format!("{} cannot be negative", self.display_name()),
            ));
        }

        if *self == Quantity::Temperature {
            if from_unit.key == "k" && value < 0.0 {
                return Err(CalcError::invalid_input("value", value.to_string(), "Kelvin cannot be negative"));
            }
            let kelvin = celsius_to_kelvin(from_unit.scale.to_base(value));
            if kelvin < -ABSOLUTE_ZERO_TOLERANCE {
                return Err(CalcError::out_of_physical_range("Temperature is below absolute zero"));
            }
        }

        let result = table.convert_raw(value, from_unit, to_unit);
        if !result.is_finite() {
            return Err(CalcError::out_of_physical_range("Result is too large to represent"));
        }

        Ok(Conversion {
            quantity: *self,
            value,
            from: from_unit.key.to_string(),
            to: to_unit.key.to_string(),
            result,
            from_symbol: from_unit.symbol.to_string(),
            to_symbol: to_unit.symbol.to_string(),
        })
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of a single conversion.
///
/// ## JSON Example
///
/// ```json
/// {
///   "quantity": "length",
///   "value": 1.0,
///   "from": "mi",
///   "to": "km",
///   "result": 1.609344,
///   "from_symbol": "mi",
///   "to_symbol": "km"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub quantity: Quantity,
    pub value: f64,
    pub from: String,
    pub to: String,
    /// Converted magnitude, unrounded
    pub result: f64,
    pub from_symbol: String,
    pub to_symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_identity() {
        // (v × factor[from]) / factor[to], exactly
        for q in [Quantity::Length, Quantity::Weight, Quantity::Volume] {
            let table = q.table();
            for a in table.units {
                for b in table.units {
                    let fa = a.scale.factor().unwrap();
                    let fb = b.scale.factor().unwrap();
                    let c = q.convert(7.25, a.key, b.key).unwrap();
                    assert_eq!(c.result, (7.25 * fa) / fb, "{} -> {}", a.key, b.key);
                }
            }
        }
    }

    #[test]
    fn test_every_table_contains_its_base_at_one() {
        for q in Quantity::ALL {
            let table = q.table();
            let base = table.find(table.base).unwrap();
            assert_eq!(base.scale.to_base(3.5), 3.5);
            assert_eq!(base.scale.from_base(3.5), 3.5);
        }
    }

    #[test]
    fn test_temperature_fixed_points() {
        let t = Quantity::Temperature;
        assert_eq!(t.convert(0.0, "c", "f").unwrap().result, 32.0);
        assert_eq!(t.convert(100.0, "c", "f").unwrap().result, 212.0);
        assert_eq!(t.convert(0.0, "c", "k").unwrap().result, 273.15);
        assert_eq!(t.convert(-40.0, "f", "c").unwrap().result, -40.0);
        assert_eq!(t.convert(212.0, "f", "c").unwrap().result, 100.0);
    }

    #[test]
    fn test_negative_kelvin_rejected() {
        for target in ["c", "f", "k"] {
            let err = Quantity::Temperature.convert(-10.0, "k", target).unwrap_err();
            assert_eq!(err.user_message(), "Kelvin cannot be negative");
        }
    }

    #[test]
    fn test_below_absolute_zero_rejected() {
        let err = Quantity::Temperature.convert(-300.0, "c", "k").unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_PHYSICAL_RANGE");
        assert!(Quantity::Temperature.convert(-500.0, "f", "c").is_err());

        // Absolute zero itself is fine
        assert!(Quantity::Temperature.convert(-273.15, "c", "k").is_ok());
        assert!(Quantity::Temperature.convert(-459.67, "f", "k").is_ok());
    }

    #[test]
    fn test_negative_rejected_for_physical_quantities() {
        for q in [Quantity::Length, Quantity::Weight, Quantity::Volume, Quantity::Area, Quantity::Speed] {
            let base = q.table().base;
            let err = q.convert(-1.0, base, base).unwrap_err();
            assert!(err.user_message().ends_with("cannot be negative"));
        }
    }

    #[test]
    fn test_speed_formulas() {
        let s = Quantity::Speed;
        assert_eq!(s.convert(10.0, "mps", "kmh").unwrap().result, 36.0);
        assert_eq!(s.convert(36.0, "kmh", "mps").unwrap().result, 10.0);
        assert_eq!(s.convert(1.0, "mph", "mps").unwrap().result, 0.44704);
        assert_eq!(s.convert(1.0, "knot", "mps").unwrap().result, 0.514444);
    }

    #[test]
    fn test_unknown_unit() {
        let err = Quantity::Length.convert(1.0, "m", "kg").unwrap_err();
        assert_eq!(err, CalcError::unknown_unit("length", "kg"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Quantity::Length.convert(f64::NAN, "m", "ft").is_err());
        assert!(Quantity::Length.convert(f64::INFINITY, "m", "ft").is_err());
    }

    #[test]
    fn test_conversion_serialization() {
        let c = Quantity::Weight.convert(2.0, "kg", "g").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"quantity\":\"weight\""));
        let roundtrip: Conversion = serde_json::from_str(&json).unwrap();
        assert_eq!(c, roundtrip);
    }
}
