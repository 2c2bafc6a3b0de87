//! # Display Formatting
//!
//! Presentation-time rounding and number formatting. Calculators never round
//! their results; the precision selector of a tool is applied here, when the
//! value is turned into text.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::format::{format_grouped, format_value, Precision};
//!
//! assert_eq!(format_value(1.609344, Precision::Decimals(2)), "1.61");
//! assert_eq!(format_value(0.5, Precision::Auto), "0.5");
//! assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
//! ```

use serde::{Deserialize, Serialize};

/// Maximum number of decimals shown in [`Precision::Auto`] mode
pub const AUTO_MAX_DECIMALS: u8 = 10;

/// Precision selector for displayed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Fixed number of decimals
    Decimals(u8),
    /// Up to [`AUTO_MAX_DECIMALS`] decimals with trailing zeros trimmed
    Auto,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Auto
    }
}

/// Round `value` to `decimals` places (half away from zero).
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Fixed-point text with exactly `decimals` places.
pub fn format_fixed(value: f64, decimals: u8) -> String {
    let text = format!("{:.*}", decimals as usize, round_to(value, decimals));
    normalize_negative_zero(text)
}

/// Format according to a [`Precision`] selector.
pub fn format_value(value: f64, precision: Precision) -> String {
    match precision {
        Precision::Decimals(d) => format_fixed(value, d),
        Precision::Auto => trim_trailing_zeros(format_fixed(value, AUTO_MAX_DECIMALS)),
    }
}

/// Fixed-point text with `,` thousands separators in the integer part.
pub fn format_grouped(value: f64, decimals: u8) -> String {
    let fixed = format_fixed(value, decimals);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a ratio (0.08447) as a percentage ("8.45%").
pub fn format_percent(ratio: f64, decimals: u8) -> String {
    format!("{}%", format_fixed(ratio * 100.0, decimals))
}

fn trim_trailing_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    normalize_negative_zero(trimmed.to_string())
}

fn normalize_negative_zero(text: String) -> String {
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1.0, 3), "1.000");
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
    }

    #[test]
    fn test_format_auto() {
        assert_eq!(format_value(1.609344, Precision::Auto), "1.609344");
        assert_eq!(format_value(20.0, Precision::Auto), "20");
        assert_eq!(format_value(1.0 / 3.0, Precision::Auto), "0.3333333333");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(1000.0, 0), "1,000");
        assert_eq!(format_grouped(-1234567.5, 1), "-1,234,567.5");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.084472, 3), "8.447%");
    }

    #[test]
    fn test_precision_serialization() {
        let json = serde_json::to_string(&Precision::Decimals(3)).unwrap();
        assert_eq!(json, r#"{"decimals":3}"#);
        let auto: Precision = serde_json::from_str(r#""auto""#).unwrap();
        assert_eq!(auto, Precision::Auto);
    }
}
