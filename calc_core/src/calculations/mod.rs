//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> CalcResult<...>` - Pure calculation function
//!
//! Calculators that read free text return `CalcResult<Option<_>>` where
//! `None` means "nothing entered yet".
//!
//! ## Available Calculators
//!
//! - [`conversion`] - Unit conversion through a base unit
//! - [`statistics`] - Mean, median, mode, quartiles, outliers
//! - [`growth`] - Compound annual growth rate
//! - [`fraction`] - Decimal ⇄ fraction, repeating decimals
//! - [`bases`] - Binary / octal / decimal / hexadecimal
//! - [`bmi`] - Body mass index
//! - [`countdown`] - Christmas countdown
//! - [`text`] - Word counts, case conversion, platform limits
//! - [`generation`] - Birth year → generation
//!
//! [`ToolInput`] wraps all of them in one tagged enum so a front end can
//! send any calculation as a single JSON document.

pub mod bases;
pub mod bmi;
pub mod conversion;
pub mod countdown;
pub mod fraction;
pub mod generation;
pub mod growth;
pub mod statistics;
pub mod text;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::settings::Settings;

// Re-export commonly used types
pub use bases::{BaseInput, BaseResult, Radix};
pub use bmi::{BmiCategory, BmiInput, BmiResult};
pub use conversion::{ConversionInput, ConversionResult};
pub use countdown::{CountdownInput, CountdownResult};
pub use fraction::{DecimalResult, DecimalToFractionInput, FractionResult, FractionToDecimalInput};
pub use generation::{GenerationInput, GenerationResult};
pub use growth::{GrowthInput, GrowthResult, Period};
pub use statistics::{Statistics, StatisticsInput};
pub use text::{CaseStyle, TextInput, TextResult};

/// Tagged wrapper for every calculator input.
///
/// ## JSON Example
///
/// ```json
/// { "tool": "fraction_to_decimal", "numerator": 1, "denominator": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolInput {
    Conversion(ConversionInput),
    Statistics(StatisticsInput),
    Growth(GrowthInput),
    DecimalToFraction(DecimalToFractionInput),
    FractionToDecimal(FractionToDecimalInput),
    Base(BaseInput),
    Bmi(BmiInput),
    Countdown(CountdownInput),
    Text(TextInput),
    Generation(GenerationInput),
}

/// Tagged wrapper for every calculator result.
///
/// `Empty` is the neutral "nothing to show yet" state for blank input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "result", rename_all = "snake_case")]
pub enum ToolOutput {
    Empty,
    Conversion(ConversionResult),
    Statistics(Statistics),
    Growth(GrowthResult),
    DecimalToFraction(FractionResult),
    FractionToDecimal(DecimalResult),
    Base(BaseResult),
    Bmi(BmiResult),
    Countdown(CountdownResult),
    Text(TextResult),
    Generation(GenerationResult),
}

impl ToolInput {
    /// Tool name as used in the `tool` tag
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolInput::Conversion(_) => "conversion",
            ToolInput::Statistics(_) => "statistics",
            ToolInput::Growth(_) => "growth",
            ToolInput::DecimalToFraction(_) => "decimal_to_fraction",
            ToolInput::FractionToDecimal(_) => "fraction_to_decimal",
            ToolInput::Base(_) => "base",
            ToolInput::Bmi(_) => "bmi",
            ToolInput::Countdown(_) => "countdown",
            ToolInput::Text(_) => "text",
            ToolInput::Generation(_) => "generation",
        }
    }

    /// Run the wrapped calculation with the given settings.
    pub fn run(&self, settings: &Settings) -> CalcResult<ToolOutput> {
        debug!(tool = self.tool_name(), "running tool");
        let output = match self {
            ToolInput::Conversion(input) => {
                let table = settings.unit_table(&input.dimension)?;
                ToolOutput::Conversion(conversion::calculate(input, table)?)
            }
            ToolInput::Statistics(input) => {
                let stats = statistics::calculate(input)?;
                if stats.is_empty() {
                    ToolOutput::Empty
                } else {
                    ToolOutput::Statistics(stats)
                }
            }
            ToolInput::Growth(input) => ToolOutput::Growth(growth::calculate(input)?),
            ToolInput::DecimalToFraction(input) => fraction::calculate_fraction(input)?
                .map(ToolOutput::DecimalToFraction)
                .unwrap_or(ToolOutput::Empty),
            ToolInput::FractionToDecimal(input) => ToolOutput::FractionToDecimal(fraction::calculate_decimal(input)?),
            ToolInput::Base(input) => bases::calculate(input)?
                .map(ToolOutput::Base)
                .unwrap_or(ToolOutput::Empty),
            ToolInput::Bmi(input) => ToolOutput::Bmi(bmi::calculate(input)?),
            ToolInput::Countdown(input) => ToolOutput::Countdown(countdown::calculate(input)?),
            ToolInput::Text(input) => {
                ToolOutput::Text(text::calculate(input, settings.reading_wpm, &settings.platform_limits)?)
            }
            ToolInput::Generation(input) => generation::calculate(input, &settings.generations)?
                .map(ToolOutput::Generation)
                .unwrap_or(ToolOutput::Empty),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_json(json: &str) -> CalcResult<ToolOutput> {
        let input: ToolInput = serde_json::from_str(json).unwrap();
        input.run(&Settings::default())
    }

    #[test]
    fn test_conversion_dispatch() {
        let out = run_json(r#"{"tool":"conversion","dimension":"length","value":1,"from_unit":"mile","to_unit":"km"}"#)
            .unwrap();
        match out {
            ToolOutput::Conversion(r) => assert!((r.values[0].value - 1.609344).abs() < 1e-12),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_growth_dispatch() {
        let out = run_json(
            r#"{"tool":"growth","start_value":10000,"end_value":15000,"period":{"kind":"duration","years":5}}"#,
        )
        .unwrap();
        match out {
            ToolOutput::Growth(r) => assert!((r.cagr_percent - 8.447).abs() < 1e-3),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(run_json(r#"{"tool":"statistics","data":"  "}"#).unwrap(), ToolOutput::Empty);
        assert_eq!(run_json(r#"{"tool":"base","value":"","radix":"decimal"}"#).unwrap(), ToolOutput::Empty);
        assert_eq!(run_json(r#"{"tool":"decimal_to_fraction","decimal":""}"#).unwrap(), ToolOutput::Empty);
    }

    #[test]
    fn test_errors_propagate() {
        let err = run_json(r#"{"tool":"statistics","data":"1, x"}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_NUMBER");
        let err = run_json(r#"{"tool":"conversion","dimension":"time","value":1,"from_unit":"s"}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_undefined_fraction_is_not_an_error() {
        let out = run_json(r#"{"tool":"fraction_to_decimal","numerator":1,"denominator":0}"#).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["tool"], "fraction_to_decimal");
        assert_eq!(json["result"]["outcome"]["status"], "undefined");
    }

    #[test]
    fn test_output_serialization_tag() {
        let json = serde_json::to_string(&ToolOutput::Empty).unwrap();
        assert_eq!(json, r#"{"tool":"empty"}"#);
    }
}
