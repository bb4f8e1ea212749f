//! # Display Formatting
//!
//! Presentation-only rounding. These helpers take computed values by copy and
//! return strings; nothing here feeds back into a calculation.
//!
//! ```rust
//! use calc_core::format::{fixed, grouped, trimmed};
//!
//! assert_eq!(fixed(100.0, 2), "100.00");
//! assert_eq!(trimmed(0.3048000, 6), "0.3048");
//! assert_eq!(grouped(1234567.891, 2), "1,234,567.89");
//! ```

/// Round to exactly `decimals` fractional digits
pub fn fixed(value: f64, decimals: usize) -> String {
    normalize_negative_zero(format!("{:.*}", decimals, value))
}

/// Round to at most `max_decimals` fractional digits, dropping trailing zeros
pub fn trimmed(value: f64, max_decimals: usize) -> String {
    let s = fixed(value, max_decimals);
    if s.contains('.') {
        let s = s.trim_end_matches('0').trim_end_matches('.');
        normalize_negative_zero(s.to_string())
    } else {
        s
    }
}

/// Fixed decimals with comma thousands separators
pub fn grouped(value: f64, decimals: usize) -> String {
    let s = fixed(value, decimals);
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// A money amount: symbol, grouping, fixed decimals
pub fn money(value: f64, symbol: &str, decimals: usize) -> String {
    let g = grouped(value, decimals);
    match g.strip_prefix('-') {
        Some(rest) => format!("-{}{}", symbol, rest),
        None => format!("{}{}", symbol, g),
    }
}

fn normalize_negative_zero(s: String) -> String {
    let is_zero = s
        .strip_prefix('-')
        .map(|rest| rest.chars().all(|c| c == '0' || c == '.'))
        .unwrap_or(false);
    if is_zero {
        s[1..].to_string()
    } else {
        s
    }
}
