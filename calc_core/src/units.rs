//! # Unit Tables
//!
//! Conversion tables for the unit converters. A [`UnitTable`] lists every
//! unit of one dimension together with its multiplicative factor relative
//! to the dimension's base unit, so any two units of the same table convert
//! through the base:
//!
//! ```text
//! value_in_to = value_in_from * factor(from) / factor(to)
//! ```
//!
//! Tables are plain data. The built-in set is exposed through
//! [`builtin_tables`] and [`builtin_table`]; additional or overriding tables
//! can be supplied through [`crate::settings::Settings::unit_tables`].
//!
//! ## Built-in Dimensions
//!
//! | Table     | Base unit   |
//! |-----------|-------------|
//! | `length`  | metre       |
//! | `weight`  | gram        |
//! | `volume`  | litre       |
//! | `area`    | square metre|
//! | `data`    | byte        |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::builtin_table;
//!
//! let length = builtin_table("length").unwrap();
//! assert_eq!(length.factor("km").unwrap(), 1000.0);
//! assert_eq!(length.factor("mile").unwrap(), 1609.344);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One unit within a [`UnitTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    /// Short symbol shown next to values (e.g., "km")
    pub symbol: String,

    /// Full name (e.g., "kilometre")
    pub name: String,

    /// Size of one of this unit expressed in the base unit
    pub factor: f64,

    /// Other accepted spellings (e.g., "kilometer", "kms")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl UnitDef {
    fn matches(&self, query: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(query)
            || self.name.eq_ignore_ascii_case(query)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(query))
    }
}

/// Conversion table for a single dimension.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dimension": "length",
///   "base_unit": "m",
///   "units": [
///     { "symbol": "m", "name": "metre", "factor": 1.0 },
///     { "symbol": "km", "name": "kilometre", "factor": 1000.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    /// Dimension name used for lookups and error messages
    pub dimension: String,

    /// Symbol of the reference unit (factor 1.0)
    pub base_unit: String,

    /// Units in display order
    pub units: Vec<UnitDef>,
}

impl UnitTable {
    /// Build a table from `(symbol, name, factor, aliases)` rows.
    ///
    /// Aliases are given as one `|`-separated string.
    pub fn from_rows(dimension: &str, base_unit: &str, rows: &[(&str, &str, f64, &str)]) -> Self {
        UnitTable {
            dimension: dimension.to_string(),
            base_unit: base_unit.to_string(),
            units: rows
                .iter()
                .map(|(symbol, name, factor, aliases)| UnitDef {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    factor: *factor,
                    aliases: aliases
                        .split('|')
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect(),
                })
                .collect(),
        }
    }

    /// Find a unit by symbol, name or alias.
    ///
    /// An exact (case-sensitive) symbol match wins. Otherwise the query is
    /// matched case-insensitively and must resolve to a single unit, so "mb"
    /// is rejected when both "MB" and "Mb" exist.
    pub fn unit(&self, query: &str) -> CalcResult<&UnitDef> {
        let query = query.trim();
        if let Some(unit) = self.units.iter().find(|u| u.symbol == query) {
            return Ok(unit);
        }
        let mut candidates = self.units.iter().filter(|u| u.matches(query));
        match (candidates.next(), candidates.next()) {
            (Some(unit), None) => Ok(unit),
            (Some(first), Some(second)) => Err(CalcError::invalid_input(
                "unit",
                query,
                format!(
                    "Ambiguous {} unit; use the exact symbol (\"{}\" or \"{}\")",
                    self.dimension, first.symbol, second.symbol
                ),
            )),
            _ => Err(CalcError::unknown_unit(query, &self.dimension)),
        }
    }

    /// Factor of `unit` relative to the base unit.
    pub fn factor(&self, unit: &str) -> CalcResult<f64> {
        self.unit(unit).map(|u| u.factor)
    }

    /// Symbols in display order
    pub fn symbols(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.symbol.as_str()).collect()
    }

    /// Check that the table is usable for conversion.
    ///
    /// Every factor must be finite and positive, symbols must be unique and
    /// the base unit must be present with factor 1.0.
    pub fn validate(&self) -> CalcResult<()> {
        if self.units.is_empty() {
            return Err(CalcError::invalid_input(
                "units",
                &self.dimension,
                "Unit table must contain at least one unit",
            ));
        }
        for (i, unit) in self.units.iter().enumerate() {
            if !unit.factor.is_finite() || unit.factor <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("units.{}.factor", unit.symbol),
                    unit.factor.to_string(),
                    "Unit factor must be a positive number",
                ));
            }
            if self.units[..i].iter().any(|u| u.symbol == unit.symbol) {
                return Err(CalcError::invalid_input(
                    "units.symbol",
                    &unit.symbol,
                    "Duplicate unit symbol",
                ));
            }
        }
        let base = self.unit(&self.base_unit)?;
        if (base.factor - 1.0).abs() > f64::EPSILON {
            return Err(CalcError::invalid_input(
                "base_unit",
                &self.base_unit,
                "Base unit must have factor 1.0",
            ));
        }
        Ok(())
    }
}

static BUILTIN_TABLES: Lazy<Vec<UnitTable>> = Lazy::new(|| {
    vec![
        UnitTable::from_rows(
            "length",
            "m",
            &[
                ("mm", "millimetre", 0.001, "millimeter|millimeters|millimetres"),
                ("cm", "centimetre", 0.01, "centimeter|centimeters|centimetres"),
                ("m", "metre", 1.0, "meter|meters|metres"),
                ("km", "kilometre", 1000.0, "kilometer|kilometers|kilometres"),
                ("in", "inch", 0.0254, "inches|\""),
                ("ft", "foot", 0.3048, "feet|'"),
                ("yd", "yard", 0.9144, "yards"),
                ("mi", "mile", 1609.344, "miles"),
                ("nmi", "nautical mile", 1852.0, "nautical miles"),
            ],
        ),
        UnitTable::from_rows(
            "weight",
            "g",
            &[
                ("mg", "milligram", 0.001, "milligrams"),
                ("g", "gram", 1.0, "grams"),
                ("kg", "kilogram", 1000.0, "kilograms|kilo|kilos"),
                ("t", "tonne", 1_000_000.0, "tonnes|metric ton"),
                ("oz", "ounce", 28.349523125, "ounces"),
                ("lb", "pound", 453.59237, "pounds|lbs"),
                ("st", "stone", 6350.29318, "stones"),
            ],
        ),
        UnitTable::from_rows(
            "volume",
            "l",
            &[
                ("ml", "millilitre", 0.001, "milliliter|milliliters|millilitres"),
                ("l", "litre", 1.0, "liter|liters|litres"),
                ("m3", "cubic metre", 1000.0, "cubic meter|m³"),
                ("tsp", "teaspoon", 0.00492892159375, "teaspoons"),
                ("tbsp", "tablespoon", 0.01478676478125, "tablespoons"),
                ("fl oz", "fluid ounce", 0.0295735295625, "floz|fluid ounces"),
                ("cup", "cup", 0.2365882365, "cups"),
                ("pt", "pint", 0.473176473, "pints"),
                ("qt", "quart", 0.946352946, "quarts"),
                ("gal", "gallon", 3.785411784, "gallons"),
            ],
        ),
        UnitTable::from_rows(
            "area",
            "m2",
            &[
                ("mm2", "square millimetre", 0.000_001, "mm²"),
                ("cm2", "square centimetre", 0.0001, "cm²"),
                ("m2", "square metre", 1.0, "m²|square meter"),
                ("ha", "hectare", 10_000.0, "hectares"),
                ("km2", "square kilometre", 1_000_000.0, "km²|square kilometer"),
                ("in2", "square inch", 0.00064516, "in²"),
                ("ft2", "square foot", 0.09290304, "ft²|sq ft"),
                ("yd2", "square yard", 0.83612736, "yd²"),
                ("ac", "acre", 4046.8564224, "acres"),
                ("mi2", "square mile", 2_589_988.110336, "mi²"),
            ],
        ),
        UnitTable::from_rows(
            "data",
            "B",
            &[
                ("bit", "bit", 0.125, "bits"),
                ("B", "byte", 1.0, "bytes"),
                ("Kb", "kilobit", 125.0, "kilobits"),
                ("Mb", "megabit", 125e3, "megabits"),
                ("Gb", "gigabit", 125e6, "gigabits"),
                ("KB", "kilobyte", 1e3, "kilobytes"),
                ("MB", "megabyte", 1e6, "megabytes"),
                ("GB", "gigabyte", 1e9, "gigabytes"),
                ("TB", "terabyte", 1e12, "terabytes"),
                ("KiB", "kibibyte", 1024.0, "kibibytes"),
                ("MiB", "mebibyte", 1_048_576.0, "mebibytes"),
                ("GiB", "gibibyte", 1_073_741_824.0, "gibibytes"),
                ("TiB", "tebibyte", 1_099_511_627_776.0, "tebibytes"),
            ],
        ),
    ]
});

/// All built-in tables in display order
pub fn builtin_tables() -> &'static [UnitTable] {
    &BUILTIN_TABLES
}

/// Look up a built-in table by dimension name (case-insensitive)
pub fn builtin_table(dimension: &str) -> Option<&'static UnitTable> {
    BUILTIN_TABLES
        .iter()
        .find(|t| t.dimension.eq_ignore_ascii_case(dimension.trim()))
}
