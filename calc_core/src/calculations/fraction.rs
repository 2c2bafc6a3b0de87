//! # Decimal ⇄ Fraction Conversion
//!
//! Converts decimals (optionally with a repeating digit block) into reduced
//! fractions, and fractions into decimal expansions by long division.
//!
//! ## Repeating decimals
//!
//! A repeating expansion is kept as structured data in [`DecimalExpansion`]
//! (integer part, non-repeating digits, repeating digits). How the repeating
//! block is drawn is left to the caller; [`DecimalExpansion::render_overbar`]
//! places a combining macron over each repeating digit and
//! [`DecimalExpansion::render_parenthesized`] wraps the block in parentheses.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fraction::{decimal_to_fraction, fraction_to_decimal, DecimalOutcome};
//!
//! let half = decimal_to_fraction(0.5).unwrap();
//! assert_eq!((half.numerator, half.denominator), (1, 2));
//!
//! match fraction_to_decimal(1, 3) {
//!     DecimalOutcome::Value(expansion) => assert_eq!(expansion.render_overbar(), "0.3\u{0304}"),
//!     DecimalOutcome::Undefined => unreachable!(),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Longest repeating block produced before the expansion is reported as
/// truncated
pub const MAX_EXPANSION_DIGITS: usize = 1_000_000;

/// Combining macron drawn over each repeating digit
pub const OVERBAR: char = '\u{0304}';

/// Greatest common divisor (Euclid). `gcd(0, 0) == 0`.
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// A fraction in lowest terms with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    /// Build a reduced fraction. The sign moves onto the numerator.
    pub fn new(numerator: i64, denominator: i64) -> CalcResult<Self> {
        Self::from_wide(numerator as i128, denominator as i128)
    }

    fn from_wide(numerator: i128, denominator: i128) -> CalcResult<Self> {
        if denominator == 0 {
            return Err(CalcError::invalid_input("denominator", "0", "Denominator cannot be zero"));
        }
        let divisor = gcd(numerator, denominator).max(1);
        let sign = if denominator < 0 { -1 } else { 1 };
        let n = sign * numerator / divisor;
        let d = sign * denominator / divisor;
        match (i64::try_from(n), i64::try_from(d)) {
            (Ok(numerator), Ok(denominator)) => Ok(Fraction { numerator, denominator }),
            _ => Err(CalcError::invalid_input(
                "value",
                format!("{}/{}", n, d),
                "Fraction is too large to represent",
            )),
        }
    }

    /// Approximate floating-point value
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whole part and proper remainder, e.g. 7/3 = 2 1/3, -7/3 = -2 1/3.
    pub fn mixed(self) -> MixedNumber {
        MixedNumber {
            negative: self.numerator < 0,
            whole: (self.numerator / self.denominator).unsigned_abs(),
            numerator: (self.numerator % self.denominator).unsigned_abs(),
            denominator: self.denominator.unsigned_abs(),
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Mixed-number view of a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedNumber {
    pub negative: bool,
    pub whole: u64,
    pub numerator: u64,
    pub denominator: u64,
}

impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        match (self.whole, self.numerator) {
            (w, 0) => write!(f, "{}{}", sign, w),
            (0, n) => write!(f, "{}{}/{}", sign, n, self.denominator),
            (w, n) => write!(f, "{}{} {}/{}", sign, w, n, self.denominator),
        }
    }
}

/// Reduce `numerator / denominator` to lowest terms.
pub fn simplify(numerator: i64, denominator: i64) -> CalcResult<Fraction> {
    Fraction::new(numerator, denominator)
}

/// Convert a finite float to a fraction using its shortest decimal form.
pub fn decimal_to_fraction(value: f64) -> CalcResult<Fraction> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("decimal", value.to_string(), "Value must be a finite number"));
    }
    parse_decimal_fraction(&value.to_string(), "")
}

/// Convert typed decimal text with an optional repeating block.
///
/// `decimal` holds the integer part and the non-repeating digits
/// (`"0.1"`), `repeating` the digits that repeat forever (`"6"`), so the
/// pair describes 0.1666… = 1/6. An empty `repeating` means the decimal
/// terminates.
///
/// ```text
/// numerator   = N * (10^r - 1) + R
/// denominator = 10^k * (10^r - 1)
/// ```
///
/// where `N` is the integer and non-repeating digits read as one integer,
/// `k` the number of non-repeating decimals, `R` the repeating digits and
/// `r` their count.
pub fn parse_decimal_fraction(decimal: &str, repeating: &str) -> CalcResult<Fraction> {
    let decimal = decimal.trim();
    let repeating = repeating.trim();

    let (negative, unsigned) = match decimal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, decimal.strip_prefix('+').unwrap_or(decimal)),
    };
    let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_digits.is_empty() && frac_digits.is_empty() && repeating.is_empty())
        || !all_digits(int_digits)
        || !all_digits(frac_digits)
    {
        return Err(CalcError::invalid_number("decimal", decimal));
    }
    if !all_digits(repeating) {
        return Err(CalcError::invalid_number("repeating", repeating));
    }

    let too_large = || CalcError::invalid_input("decimal", decimal, "Too many digits to convert exactly");
    let read = |s: &str| -> CalcResult<i128> {
        if s.is_empty() {
            Ok(0)
        } else {
            s.parse::<i128>().map_err(|_| too_large())
        }
    };
    let pow10 = |exp: usize| -> CalcResult<i128> {
        u32::try_from(exp)
            .ok()
            .and_then(|e| 10i128.checked_pow(e))
            .ok_or_else(too_large)
    };

    let n = read(&format!("{}{}", int_digits, frac_digits))?;
    let scale = pow10(frac_digits.len())?;

    let (numerator, denominator) = if repeating.is_empty() {
        (n, scale)
    } else {
        let nines = pow10(repeating.len())? - 1;
        let r = read(repeating)?;
        let numerator = n.checked_mul(nines).and_then(|v| v.checked_add(r)).ok_or_else(too_large)?;
        let denominator = scale.checked_mul(nines).ok_or_else(too_large)?;
        (numerator, denominator)
    };

    let numerator = if negative { -numerator } else { numerator };
    Fraction::from_wide(numerator, denominator)
}

/// Decimal expansion of a fraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalExpansion {
    /// True when the value is below zero
    pub negative: bool,

    /// Digits before the decimal point
    pub integer: String,

    /// Digits after the point that do not repeat
    pub non_repeating: String,

    /// Repeating block (empty for terminating decimals)
    pub repeating: String,

    /// The repeating block is longer than [`MAX_EXPANSION_DIGITS`]; the
    /// digits produced so far are in `non_repeating`
    #[serde(default)]
    pub truncated: bool,
}

impl DecimalExpansion {
    /// True when the expansion ends
    pub fn is_terminating(&self) -> bool {
        self.repeating.is_empty() && !self.truncated
    }

    fn sign(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }

    /// Text without repeat markers, repeating block written once
    pub fn render_plain(&self) -> String {
        self.render_with(|block| block.to_string())
    }

    /// Repeating block wrapped in parentheses, e.g. `0.1(6)`
    pub fn render_parenthesized(&self) -> String {
        self.render_with(|block| format!("({})", block))
    }

    /// Repeating digits each followed by a combining over-bar, e.g. `0.3̄`
    pub fn render_overbar(&self) -> String {
        self.render_with(|block| {
            block
                .chars()
                .flat_map(|c| [c, OVERBAR])
                .collect()
        })
    }

    fn render_with(&self, mark: impl Fn(&str) -> String) -> String {
        let mut out = format!("{}{}", self.sign(), self.integer);
        if !self.non_repeating.is_empty() || !self.repeating.is_empty() {
            out.push('.');
            out.push_str(&self.non_repeating);
            if !self.repeating.is_empty() {
                out.push_str(&mark(&self.repeating));
            }
        }
        if self.truncated {
            out.push('…');
        }
        out
    }

    /// Approximate value, with the repeating block extended to full precision
    pub fn to_f64(&self) -> f64 {
        let mut digits = format!("{}{}.{}", self.sign(), self.integer, self.non_repeating);
        if !self.repeating.is_empty() {
            while digits.len() < 40 {
                digits.push_str(&self.repeating);
            }
        }
        digits.parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for DecimalExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_overbar())
    }
}

/// Outcome of dividing a numerator by a denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "expansion", rename_all = "snake_case")]
pub enum DecimalOutcome {
    /// Division by zero
    Undefined,
    /// Decimal expansion of the quotient
    Value(DecimalExpansion),
}

impl DecimalOutcome {
    /// The expansion, if the division was defined
    pub fn expansion(&self) -> Option<&DecimalExpansion> {
        match self {
            DecimalOutcome::Value(e) => Some(e),
            DecimalOutcome::Undefined => None,
        }
    }
}

/// Long division of `numerator / denominator`.
///
/// The fraction is reduced first. Factors of 2 and 5 in the reduced
/// denominator set the length of the non-repeating part; the repeating
/// block is as long as the multiplicative order of 10 modulo what remains.
/// Blocks longer than [`MAX_EXPANSION_DIGITS`] are cut off and flagged as
/// truncated.
pub fn fraction_to_decimal(numerator: i64, denominator: i64) -> DecimalOutcome {
    expand_with_limit(numerator, denominator, MAX_EXPANSION_DIGITS)
}

fn expand_with_limit(numerator: i64, denominator: i64, max_digits: usize) -> DecimalOutcome {
    if denominator == 0 {
        debug!(numerator, "fraction with zero denominator");
        return DecimalOutcome::Undefined;
    }

    let negative = (numerator < 0) != (denominator < 0) && numerator != 0;
    let n = numerator.unsigned_abs() as u128;
    let d = denominator.unsigned_abs() as u128;
    let common = gcd(n as i128, d as i128).max(1) as u128;
    let (n, d) = (n / common, d / common);

    let (twos, rest) = strip_factor(d, 2);
    let (fives, coprime) = strip_factor(rest, 5);
    let prefix_len = twos.max(fives);
    let period = repeating_period(coprime, max_digits);

    let integer = (n / d).to_string();
    let mut remainder = n % d;
    let mut next_digit = || {
        remainder *= 10;
        let digit = (remainder / d) as u32;
        remainder %= d;
        char::from_digit(digit, 10).unwrap_or('0')
    };

    let mut non_repeating: String = (0..prefix_len).map(|_| next_digit()).collect();
    let (repeating, truncated) = match period {
        Some(len) => ((0..len).map(|_| next_digit()).collect(), false),
        None => {
            debug!(denominator, max_digits, "repeating block too long");
            non_repeating.extend((0..max_digits).map(|_| next_digit()));
            (String::new(), true)
        }
    };

    DecimalOutcome::Value(DecimalExpansion {
        negative,
        integer,
        non_repeating,
        repeating,
        truncated,
    })
}

/// Split `value` into the exponent of `factor` and the remaining cofactor.
fn strip_factor(mut value: u128, factor: u128) -> (usize, u128) {
    let mut count = 0;
    while value % factor == 0 {
        value /= factor;
        count += 1;
    }
    (count, value)
}

/// Multiplicative order of 10 modulo `modulus` (coprime to 10), or 0 when
/// `modulus` is 1. `None` when the order exceeds `limit`.
fn repeating_period(modulus: u128, limit: usize) -> Option<usize> {
    if modulus == 1 {
        return Some(0);
    }
    let mut power = 10 % modulus;
    let mut order = 1;
    while power != 1 {
        if order >= limit {
            return None;
        }
        power = power * 10 % modulus;
        order += 1;
    }
    Some(order)
}

/// Input for decimal → fraction.
///
/// ## JSON Example
///
/// ```json
/// { "decimal": "0.1", "repeating": "6" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalToFractionInput {
    /// Integer part and non-repeating decimals as typed
    pub decimal: String,

    /// Digits that repeat after the non-repeating part
    #[serde(default)]
    pub repeating: String,
}

/// Result of decimal → fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionResult {
    pub fraction: Fraction,
    pub mixed: MixedNumber,
    pub value: f64,
}

/// Convert a decimal. Blank input yields `Ok(None)`.
pub fn calculate_fraction(input: &DecimalToFractionInput) -> CalcResult<Option<FractionResult>> {
    if input.decimal.trim().is_empty() && input.repeating.trim().is_empty() {
        return Ok(None);
    }
    let fraction = parse_decimal_fraction(&input.decimal, &input.repeating)?;
    debug!(%fraction, "decimal to fraction");
    Ok(Some(FractionResult {
        fraction,
        mixed: fraction.mixed(),
        value: fraction.to_f64(),
    }))
}

/// Input for fraction → decimal.
///
/// ## JSON Example
///
/// ```json
/// { "numerator": 1, "denominator": 3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionToDecimalInput {
    pub numerator: i64,
    pub denominator: i64,
}

/// Result of fraction → decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalResult {
    /// Expansion or `undefined`
    pub outcome: DecimalOutcome,

    /// Reduced form of the input fraction (absent when undefined)
    pub simplified: Option<Fraction>,
}

/// Divide the fraction out. A zero denominator is reported as `undefined`.
///
/// `simplified` is omitted when the reduced fraction does not fit in `i64`
/// (`i64::MIN / -1`); the expansion is still returned.
pub fn calculate_decimal(input: &FractionToDecimalInput) -> CalcResult<DecimalResult> {
    let outcome = fraction_to_decimal(input.numerator, input.denominator);
    let simplified = match outcome {
        DecimalOutcome::Undefined => None,
        DecimalOutcome::Value(_) => Fraction::new(input.numerator, input.denominator).ok(),
    };
    Ok(DecimalResult { outcome, simplified })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(n: i64, d: i64) -> DecimalExpansion {
        fraction_to_decimal(n, d).expansion().cloned().unwrap()
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(-48, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_half() {
        assert_eq!(decimal_to_fraction(0.5).unwrap(), Fraction { numerator: 1, denominator: 2 });
    }

    #[test]
    fn test_terminating_decimals() {
        assert_eq!(decimal_to_fraction(0.75).unwrap(), Fraction { numerator: 3, denominator: 4 });
        assert_eq!(decimal_to_fraction(-2.125).unwrap(), Fraction { numerator: -17, denominator: 8 });
        assert_eq!(decimal_to_fraction(3.0).unwrap(), Fraction { numerator: 3, denominator: 1 });
        assert_eq!(parse_decimal_fraction(".25", "").unwrap(), Fraction { numerator: 1, denominator: 4 });
    }

    #[test]
    fn test_repeating_decimals() {
        assert_eq!(parse_decimal_fraction("0.", "3").unwrap(), Fraction { numerator: 1, denominator: 3 });
        assert_eq!(parse_decimal_fraction("0.1", "6").unwrap(), Fraction { numerator: 1, denominator: 6 });
        assert_eq!(parse_decimal_fraction("2.1", "6").unwrap(), Fraction { numerator: 13, denominator: 6 });
        assert_eq!(parse_decimal_fraction("0", "142857").unwrap(), Fraction { numerator: 1, denominator: 7 });
        assert_eq!(parse_decimal_fraction("-0.", "09").unwrap(), Fraction { numerator: -1, denominator: 11 });
    }

    #[test]
    fn test_invalid_decimal_text() {
        assert!(parse_decimal_fraction("1.2.3", "").unwrap_err().is_parse_error());
        assert!(parse_decimal_fraction("abc", "").unwrap_err().is_parse_error());
        assert!(parse_decimal_fraction("0.1", "x").unwrap_err().is_parse_error());
    }

    #[test]
    fn test_too_many_digits() {
        let long = format!("0.{}", "1".repeat(45));
        assert_eq!(parse_decimal_fraction(&long, "").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_one_third_overbar() {
        let e = expand(1, 3);
        assert_eq!(e.integer, "0");
        assert_eq!(e.non_repeating, "");
        assert_eq!(e.repeating, "3");
        assert_eq!(e.render_overbar(), "0.3\u{0304}");
        assert_eq!(e.to_string(), e.render_overbar());
    }

    #[test]
    fn test_mixed_repeating_block() {
        let e = expand(1, 6);
        assert_eq!(e.non_repeating, "1");
        assert_eq!(e.repeating, "6");
        assert_eq!(e.render_parenthesized(), "0.1(6)");

        let e = expand(22, 7);
        assert_eq!(e.integer, "3");
        assert_eq!(e.repeating, "142857");
    }

    #[test]
    fn test_terminating_expansion() {
        let e = expand(7, 8);
        assert!(e.is_terminating());
        assert_eq!(e.render_plain(), "0.875");
        assert_eq!(expand(4, 2).render_plain(), "2");
    }

    #[test]
    fn test_negative_expansion() {
        assert_eq!(expand(-1, 4).render_plain(), "-0.25");
        assert_eq!(expand(1, -3).render_parenthesized(), "-0.(3)");
        assert_eq!(expand(0, -5).render_plain(), "0");
    }

    #[test]
    fn test_zero_denominator_is_undefined() {
        assert_eq!(fraction_to_decimal(5, 0), DecimalOutcome::Undefined);
        let result = calculate_decimal(&FractionToDecimalInput { numerator: 5, denominator: 0 }).unwrap();
        assert!(result.simplified.is_none());
    }

    #[test]
    fn test_long_period_is_found() {
        // 10 has order 96 modulo 97
        let e = expand(1, 97);
        assert!(!e.truncated);
        assert_eq!(e.non_repeating, "");
        assert_eq!(e.repeating.len(), 96);
        assert!(e.repeating.starts_with("010309278350515463917525773195876288659793814432989690721649484536082474226804123711340206185567"));

        for d in [7919i64, 9973] {
            let e = expand(1, d);
            assert!(!e.truncated);
            assert!(!e.repeating.is_empty());
            let mut power = 1u64;
            for _ in 0..e.repeating.len() {
                power = power * 10 % d as u64;
            }
            assert_eq!(power, 1, "block length for 1/{} must be a period of 10", d);
        }
    }

    #[test]
    fn test_non_repeating_prefix_with_long_block() {
        // 1/(8 * 97): three prefix digits, then the 96-digit block
        let e = expand(1, 776);
        assert_eq!(e.non_repeating, "001");
        assert_eq!(e.repeating.len(), 96);
        assert_eq!(expand(3, 776), expand(6, 1552));
    }

    #[test]
    fn test_truncated_expansion() {
        let e = expand_with_limit(1, 7, 3).expansion().cloned().unwrap();
        assert!(e.truncated);
        assert_eq!(e.non_repeating, "142");
        assert!(e.repeating.is_empty());
        assert!(!e.is_terminating());

        let e = expand_with_limit(1, 7, 6).expansion().cloned().unwrap();
        assert!(!e.truncated);
        assert_eq!(e.repeating, "142857");
    }

    #[test]
    fn test_unrepresentable_reduction_keeps_expansion() {
        let result = calculate_decimal(&FractionToDecimalInput { numerator: i64::MIN, denominator: -1 }).unwrap();
        let e = result.outcome.expansion().unwrap();
        assert_eq!(e.render_plain(), "9223372036854775808");
        assert!(!e.negative);
        assert!(result.simplified.is_none());
    }

    #[test]
    fn test_mixed_number() {
        let f = Fraction::new(-7, 3).unwrap();
        assert_eq!(f.mixed().to_string(), "-2 1/3");
        assert_eq!(Fraction::new(6, -4).unwrap(), Fraction { numerator: -3, denominator: 2 });
        assert_eq!(Fraction::new(2, 3).unwrap().mixed().to_string(), "2/3");
    }

    #[test]
    fn test_blank_input_is_neutral() {
        let input = DecimalToFractionInput { decimal: "  ".to_string(), repeating: String::new() };
        assert_eq!(calculate_fraction(&input).unwrap(), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&DecimalOutcome::Undefined).unwrap();
        assert_eq!(json, r#"{"status":"undefined"}"#);
    }
}
