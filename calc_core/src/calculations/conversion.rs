//! # Unit Conversion
//!
//! Converts a quantity between two units of the same [`UnitTable`] by going
//! through the table's base unit. No rounding is applied here; see
//! [`crate::format`] for display precision.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::conversion::convert;
//! use calc_core::units::builtin_table;
//!
//! let length = builtin_table("length").unwrap();
//! let km = convert(1.0, "mile", "km", length).unwrap();
//! assert!((km - 1.609344).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{parse_optional_f64, CalcError, CalcResult};
use crate::units::UnitTable;

/// Input parameters for the unit converter.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dimension": "length",
///   "value": 1.0,
///   "from_unit": "mi",
///   "to_unit": "km"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    /// Name of the unit table (e.g., "length", "weight")
    pub dimension: String,

    /// Quantity to convert
    pub value: f64,

    /// Unit the value is expressed in
    pub from_unit: String,

    /// Target unit; when absent the value is expressed in every unit of the table
    #[serde(default)]
    pub to_unit: Option<String>,
}

/// One converted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedValue {
    /// Unit symbol
    pub unit: String,

    /// Unit name
    pub name: String,

    /// Unrounded value in this unit
    pub value: f64,
}

/// Results from a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Dimension of the table used
    pub dimension: String,

    /// Input value echoed back
    pub input_value: f64,

    /// Symbol of the input unit
    pub from_unit: String,

    /// Converted values (one entry when a target unit was given)
    pub values: Vec<ConvertedValue>,
}

/// Convert `value` from `from_unit` to `to_unit`.
///
/// Zero is accepted. Negative or non-finite values are rejected with
/// [`CalcError::InvalidInput`]; units missing from the table produce
/// [`CalcError::UnknownUnit`].
pub fn convert(value: f64, from_unit: &str, to_unit: &str, table: &UnitTable) -> CalcResult<f64> {
    validate_value(value)?;
    let from = table.factor(from_unit)?;
    let to = table.factor(to_unit)?;
    Ok(value * from / to)
}

/// Express `value` in every unit of the table, in table order.
pub fn convert_all(value: f64, from_unit: &str, table: &UnitTable) -> CalcResult<Vec<ConvertedValue>> {
    validate_value(value)?;
    let from = table.factor(from_unit)?;
    Ok(table
        .units
        .iter()
        .map(|u| ConvertedValue {
            unit: u.symbol.clone(),
            name: u.name.clone(),
            value: value * from / u.factor,
        })
        .collect())
}

/// Convert free-form text as typed into a form field.
///
/// Empty text yields `Ok(None)`; text that is not a number is a parse error.
pub fn convert_text(text: &str, from_unit: &str, to_unit: &str, table: &UnitTable) -> CalcResult<Option<f64>> {
    match parse_optional_f64("value", text)? {
        Some(value) => convert(value, from_unit, to_unit, table).map(Some),
        None => Ok(None),
    }
}

/// Run a conversion described by a [`ConversionInput`] against `table`.
pub fn calculate(input: &ConversionInput, table: &UnitTable) -> CalcResult<ConversionResult> {
    debug!(
        dimension = %table.dimension,
        value = input.value,
        from = %input.from_unit,
        to = ?input.to_unit,
        "unit conversion"
    );

    let from = table.unit(&input.from_unit)?;
    let values = match &input.to_unit {
        Some(to_unit) => {
            let to = table.unit(to_unit)?;
            vec![ConvertedValue {
                unit: to.symbol.clone(),
                name: to.name.clone(),
                value: convert(input.value, &from.symbol, &to.symbol, table)?,
            }]
        }
        None => convert_all(input.value, &from.symbol, table)?,
    };

    Ok(ConversionResult {
        dimension: table.dimension.clone(),
        input_value: input.value,
        from_unit: from.symbol.clone(),
        values,
    })
}

fn validate_value(value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("value", value.to_string(), "Value must be a finite number"));
    }
    if value < 0.0 {
        debug!(value, "rejected negative quantity");
        return Err(CalcError::invalid_input("value", value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::builtin_table;

    fn length() -> &'static UnitTable {
        builtin_table("length").unwrap()
    }

    #[test]
    fn test_mile_to_km() {
        let km = convert(1.0, "mile", "km", length()).unwrap();
        assert!((km - 1.609344).abs() < 1e-12);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        let weight = builtin_table("weight").unwrap();
        let kg = convert(10.0, "lb", "kg", weight).unwrap();
        assert!((kg - 4.5359237).abs() < 1e-12);
    }

    #[test]
    fn test_gallon_to_litres() {
        let volume = builtin_table("volume").unwrap();
        let l = convert(1.0, "gal", "l", volume).unwrap();
        assert!((l - 3.785411784).abs() < 1e-12);
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(convert(0.0, "m", "ft", length()).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_rejected() {
        let err = convert(-1.0, "m", "ft", length()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(1.0, "m", "parsec", length()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_convert_text() {
        assert_eq!(convert_text("", "m", "cm", length()).unwrap(), None);
        assert_eq!(convert_text("2", "m", "cm", length()).unwrap(), Some(200.0));
        assert!(convert_text("2m", "m", "cm", length()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_convert_all_table_order() {
        let values = convert_all(1.0, "km", length()).unwrap();
        assert_eq!(values.len(), length().units.len());
        assert_eq!(values[0].unit, "mm");
        assert!((values[0].value - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_calculate_single_target() {
        let input = ConversionInput {
            dimension: "length".to_string(),
            value: 12.0,
            from_unit: "inches".to_string(),
            to_unit: Some("feet".to_string()),
        };
        let result = calculate(&input, length()).unwrap();
        assert_eq!(result.from_unit, "in");
        assert_eq!(result.values.len(), 1);
        assert_eq!(result.values[0].unit, "ft");
        assert!((result.values[0].value - 1.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::units::builtin_tables;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trip_recovers_value(
            x in 0.0_f64..1.0e9,
            table_idx in 0usize..5,
            a in 0usize..16,
            b in 0usize..16,
        ) {
            let table = &builtin_tables()[table_idx % builtin_tables().len()];
            let from = &table.units[a % table.units.len()].symbol;
            let to = &table.units[b % table.units.len()].symbol;

            let there = convert(x, from, to, table).unwrap();
            let back = convert(there, to, from, table).unwrap();
            prop_assert!((back - x).abs() <= 1e-9 * x.max(1.0));
        }
    }
}
