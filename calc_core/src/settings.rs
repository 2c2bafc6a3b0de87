//! # Settings
//!
//! Configuration shared by the calculators: display precision, reading
//! speed, platform character limits, the generation table and extra unit
//! tables. Everything has a built-in default, so an empty settings file
//! (`{}`) is valid.
//!
//! Settings serialize to JSON. See [`crate::file_io::load_settings`] for
//! reading them from disk with schema version validation.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::Settings;
//!
//! let settings: Settings = serde_json::from_str(r#"{ "reading_wpm": 250 }"#).unwrap();
//! assert_eq!(settings.reading_wpm, 250);
//! assert!(settings.unit_table("length").is_ok());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::generation::{self, default_generations, GenerationRange};
use crate::calculations::text::{default_platform_limits, PlatformLimit, DEFAULT_READING_WPM};
use crate::errors::{CalcError, CalcResult};
use crate::format::Precision;
use crate::units::{builtin_table, builtin_tables, UnitTable};

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Calculator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Display precision for converted values
    pub precision: Precision,

    /// Reading speed used for reading-time estimates
    pub reading_wpm: u32,

    /// Character limits checked by the text tool
    pub platform_limits: Vec<PlatformLimit>,

    /// Birth-year ranges for the generation lookup
    pub generations: Vec<GenerationRange>,

    /// Extra unit tables keyed by dimension name. A table named like a
    /// built-in one ("length") replaces it.
    pub unit_tables: BTreeMap<String, UnitTable>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: SCHEMA_VERSION.to_string(),
            precision: Precision::default(),
            reading_wpm: DEFAULT_READING_WPM,
            platform_limits: default_platform_limits(),
            generations: default_generations(),
            unit_tables: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Resolve a unit table, preferring configured tables over built-ins.
    pub fn unit_table(&self, dimension: &str) -> CalcResult<&UnitTable> {
        let key = dimension.trim();
        self.unit_tables
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, table)| table)
            .or_else(|| builtin_table(key))
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "dimension",
                    key,
                    format!("Unknown dimension; available: {}", self.dimension_names().join(", ")),
                )
            })
    }

    /// Names of every available table, built-ins first
    pub fn dimension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = builtin_tables().iter().map(|t| t.dimension.clone()).collect();
        for name in self.unit_tables.keys() {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Validate every configured table and range.
    pub fn validate(&self) -> CalcResult<()> {
        if self.reading_wpm == 0 {
            return Err(CalcError::invalid_input("reading_wpm", "0", "Reading speed must be positive"));
        }
        for table in self.unit_tables.values() {
            table.validate()?;
        }
        generation::validate_table(&self.generations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.version, SCHEMA_VERSION);
        assert_eq!(settings.reading_wpm, 200);
        assert_eq!(settings.platform_limits[0].max_chars, 280);
        settings.validate().unwrap();
    }

    #[test]
    fn test_empty_json_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("Millennials"));
        let roundtrip: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, settings);
    }

    #[test]
    fn test_custom_table_overrides_builtin() {
        let mut settings = Settings::default();
        let custom = UnitTable::from_rows("length", "m", &[("m", "metre", 1.0, ""), ("furlong", "furlong", 201.168, "")]);
        settings.unit_tables.insert("Length".to_string(), custom);

        let table = settings.unit_table("length").unwrap();
        assert!(table.factor("furlong").is_ok());
        assert_eq!(settings.dimension_names().iter().filter(|n| n.eq_ignore_ascii_case("length")).count(), 1);
    }

    #[test]
    fn test_unknown_dimension() {
        let err = Settings::default().unit_table("time").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_validate_catches_bad_table() {
        let mut settings = Settings::default();
        settings
            .unit_tables
            .insert("broken".to_string(), UnitTable::from_rows("broken", "x", &[("y", "y", 2.0, "")]));
        assert!(settings.validate().is_err());
    }
}
