//! Property tests for the pivot conversion engine.

use approx::assert_relative_eq;
use calc_core::currency;
use calc_core::units::{Quantity, Scale};
use proptest::prelude::*;

/// Quantities whose units are all plain factors
const LINEAR: [Quantity; 4] = [Quantity::Length, Quantity::Weight, Quantity::Volume, Quantity::Area];

fn arb_quantity() -> impl Strategy<Value = Quantity> {
    prop_oneof![
        Just(Quantity::Length),
        Just(Quantity::Weight),
        Just(Quantity::Volume),
        Just(Quantity::Area),
        Just(Quantity::Speed),
        Just(Quantity::Temperature),
    ]
}

/// A quantity plus two indices into its unit table
fn arb_unit_pair() -> impl Strategy<Value = (Quantity, usize, usize)> {
    arb_quantity().prop_flat_map(|q| {
        let n = q.table().units.len();
        (Just(q), 0..n, 0..n)
    })
}

proptest! {
    #[test]
    fn round_trip_returns_original((quantity, a, b) in arb_unit_pair(), value in 0.0f64..1.0e6) {
        let units = quantity.table().units;
        let (from, to) = (units[a].key, units[b].key);

        let there = quantity.convert(value, from, to).unwrap();
        let back = quantity.convert(there.result, to, from).unwrap();

        prop_assert!(
            (back.result - value).abs() <= 1e-9 * value.abs().max(1.0),
            "{} {} -> {} -> {} gave {}", value, from, to, from, back.result
        );
    }

    #[test]
    fn factor_identity_is_exact(q in 0usize..LINEAR.len(), a in 0usize..7, b in 0usize..7, value in 0.0f64..1.0e9) {
        let quantity = LINEAR[q];
        let units = quantity.table().units;
        let (from, to) = (&units[a % units.len()], &units[b % units.len()]);
        let (Scale::Factor(fa), Scale::Factor(fb)) = (from.scale, to.scale) else {
            panic!("{} has a non-factor unit", quantity);
        };

        let converted = quantity.convert(value, from.key, to.key).unwrap();
        prop_assert_eq!(converted.result, (value * fa) / fb);
    }

    #[test]
    fn negative_magnitudes_rejected_outside_temperature(value in -1.0e6f64..-1.0e-6) {
        for quantity in Quantity::ALL {
            let unit = quantity.table().units[0].key;
            let outcome = quantity.convert(value, unit, unit);
            prop_assert_eq!(outcome.is_ok(), quantity.allows_negative() && value >= -273.15);
        }
    }

    #[test]
    fn currency_round_trip(a in 0usize..currency::CURRENCIES.len(), b in 0usize..currency::CURRENCIES.len(), amount in 0.0f64..1.0e7) {
        let (from, to) = (currency::CURRENCIES[a].code, currency::CURRENCIES[b].code);
        let there = currency::convert(amount, from, to).unwrap();
        let back = currency::convert(there.result, to, from).unwrap();
        prop_assert!((back.result - amount).abs() <= 1e-9 * amount.max(1.0));
    }
}

#[test]
fn temperature_fixed_points() {
    let t = Quantity::Temperature;
    assert_eq!(t.convert(0.0, "c", "f").unwrap().result, 32.0);
    assert_eq!(t.convert(100.0, "c", "f").unwrap().result, 212.0);
    assert_eq!(t.convert(0.0, "c", "k").unwrap().result, 273.15);
    assert_relative_eq!(t.convert(-40.0, "f", "c").unwrap().result, -40.0, epsilon = 1e-12);
    assert_relative_eq!(t.convert(0.0, "k", "c").unwrap().result, -273.15, epsilon = 1e-12);
}

#[test]
fn negative_kelvin_rejected_for_every_target() {
    for to in ["c", "f", "k"] {
        let err = Quantity::Temperature.convert(-10.0, "k", to).unwrap_err();
        assert_eq!(err.user_message(), "Kelvin cannot be negative");
    }
}

#[test]
fn below_absolute_zero_rejected() {
    let err = Quantity::Temperature.convert(-300.0, "c", "k").unwrap_err();
    assert_eq!(err.error_code(), "OUT_OF_PHYSICAL_RANGE");
    let err = Quantity::Temperature.convert(-500.0, "f", "c").unwrap_err();
    assert_eq!(err.error_code(), "OUT_OF_PHYSICAL_RANGE");
}

#[test]
fn speed_formula_units() {
    let s = Quantity::Speed;
    assert_relative_eq!(s.convert(36.0, "kmh", "mps").unwrap().result, 10.0, epsilon = 1e-12);
    assert_relative_eq!(s.convert(1.0, "mph", "mps").unwrap().result, 0.44704, epsilon = 1e-12);
    assert_relative_eq!(s.convert(1.0, "knot", "kmh").unwrap().result, 0.514444 * 3.6, epsilon = 1e-12);
}
