//! # Number Base Conversion
//!
//! Reads an integer written in binary, octal, decimal or hexadecimal and
//! writes it out in all four bases.
//!
//! Accepted input: optional `-`, optional `0b` / `0o` / `0x` prefix matching
//! the selected base, digits in either case. Spaces and `_` are ignored so
//! grouped input such as `1111 0000` or `ff_ff` is accepted.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bases::{convert_base, Radix};
//!
//! let out = convert_base("FF", Radix::Hexadecimal).unwrap().unwrap();
//! assert_eq!(out.decimal, "255");
//! assert_eq!(out.binary, "11111111");
//! assert_eq!(out.octal, "377");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Supported number bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    /// Numeric base
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            Radix::Binary => Some("0b"),
            Radix::Octal => Some("0o"),
            Radix::Decimal => None,
            Radix::Hexadecimal => Some("0x"),
        }
    }

    /// Parse a base selector: `2`, `bin`, `binary`, `16`, `hex`, ...
    pub fn from_name(name: &str) -> CalcResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "2" | "bin" | "binary" => Ok(Radix::Binary),
            "8" | "oct" | "octal" => Ok(Radix::Octal),
            "10" | "dec" | "decimal" => Ok(Radix::Decimal),
            "16" | "hex" | "hexadecimal" => Ok(Radix::Hexadecimal),
            other => Err(CalcError::invalid_input(
                "radix",
                other,
                "Base must be one of 2, 8, 10 or 16",
            )),
        }
    }
}

/// Input for the base converter.
///
/// ## JSON Example
///
/// ```json
/// { "value": "FF", "radix": "hexadecimal" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseInput {
    /// Digits as typed
    pub value: String,

    /// Base the digits are written in
    pub radix: Radix,
}

/// The same integer in every supported base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResult {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    /// Upper-case hexadecimal digits
    pub hexadecimal: String,
}

impl BaseResult {
    /// Representation in `radix`
    pub fn in_radix(&self, radix: Radix) -> &str {
        match radix {
            Radix::Binary => &self.binary,
            Radix::Octal => &self.octal,
            Radix::Decimal => &self.decimal,
            Radix::Hexadecimal => &self.hexadecimal,
        }
    }
}

/// Parse `text` in `radix`. Blank text yields `Ok(None)`.
pub fn parse_in_radix(text: &str, radix: Radix) -> CalcResult<Option<i128>> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace() && *c != '_').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let digits = match radix.prefix() {
        Some(prefix)
            if unsigned.len() > prefix.len()
                && unsigned.get(..prefix.len()).is_some_and(|p| p.eq_ignore_ascii_case(prefix)) =>
        {
            &unsigned[prefix.len()..]
        }
        _ => unsigned,
    };

    let invalid = || {
        debug!(text, base = radix.base(), "rejected digits");
        CalcError::invalid_number(format!("value (base {})", radix.base()), text.trim())
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix.base())) {
        return Err(invalid());
    }

    let magnitude = u128::from_str_radix(digits, radix.base()).map_err(|_| {
        CalcError::invalid_input("value", text.trim(), "Number is too large")
    })?;
    let value = if negative {
        0i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    };
    value
        .map(Some)
        .ok_or_else(|| CalcError::invalid_input("value", text.trim(), "Number is too large"))
}

/// Render `value` in every base.
pub fn render_all(value: i128) -> BaseResult {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    BaseResult {
        binary: format!("{}{:b}", sign, magnitude),
        octal: format!("{}{:o}", sign, magnitude),
        decimal: value.to_string(),
        hexadecimal: format!("{}{:X}", sign, magnitude),
    }
}

/// Convert `text` written in `radix` into all bases.
pub fn convert_base(text: &str, radix: Radix) -> CalcResult<Option<BaseResult>> {
    Ok(parse_in_radix(text, radix)?.map(render_all))
}

/// Run the base converter on a [`BaseInput`].
pub fn calculate(input: &BaseInput) -> CalcResult<Option<BaseResult>> {
    convert_base(&input.value, input.radix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_ff() {
        let out = convert_base("FF", Radix::Hexadecimal).unwrap().unwrap();
        assert_eq!(out.decimal, "255");
        assert_eq!(out.binary, "11111111");
        assert_eq!(out.octal, "377");
        assert_eq!(out.hexadecimal, "FF");
    }

    #[test]
    fn test_chain_through_bases() {
        let dec = convert_base("FF", Radix::Hexadecimal).unwrap().unwrap().decimal;
        let bin = convert_base(&dec, Radix::Decimal).unwrap().unwrap().binary;
        let oct = convert_base(&bin, Radix::Binary).unwrap().unwrap().octal;
        assert_eq!(oct, "377");
    }

    #[test]
    fn test_prefix_and_grouping() {
        assert_eq!(parse_in_radix("0xff_ff", Radix::Hexadecimal).unwrap(), Some(65535));
        assert_eq!(parse_in_radix("0b1010 1010", Radix::Binary).unwrap(), Some(170));
        assert_eq!(parse_in_radix("0o17", Radix::Octal).unwrap(), Some(15));
    }

    #[test]
    fn test_negative() {
        let out = convert_base("-10", Radix::Decimal).unwrap().unwrap();
        assert_eq!(out.binary, "-1010");
        assert_eq!(out.hexadecimal, "-A");
    }

    #[test]
    fn test_invalid_digit() {
        let err = convert_base("102", Radix::Binary).unwrap_err();
        assert!(err.is_parse_error());
        assert!(convert_base("0x", Radix::Hexadecimal).is_err());
    }

    #[test]
    fn test_blank_is_neutral() {
        assert_eq!(convert_base("   ", Radix::Decimal).unwrap(), None);
    }

    #[test]
    fn test_radix_names() {
        assert_eq!(Radix::from_name("HEX").unwrap(), Radix::Hexadecimal);
        assert_eq!(Radix::from_name("2").unwrap(), Radix::Binary);
        assert!(Radix::from_name("7").is_err());
    }
}
