//! # calc_core - Reckon Calculation Engine
//!
//! `calc_core` holds the arithmetic behind the Reckon calculators and
//! converters: unit conversion, descriptive statistics, compound growth,
//! decimal/fraction conversion, number bases, BMI, a Christmas countdown,
//! text utilities and a generation lookup. All inputs and outputs are
//! JSON-serializable so any front end can drive them.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Tables as data**: Unit tables, platform limits and generation ranges
//!   are passed in, with built-in defaults in [`settings::Settings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::ToolInput;
//! use calc_core::settings::Settings;
//!
//! let input: ToolInput = serde_json::from_str(
//!     r#"{ "tool": "base", "value": "FF", "radix": "hexadecimal" }"#,
//! ).unwrap();
//! let output = input.run(&Settings::default()).unwrap();
//! let json = serde_json::to_string_pretty(&output).unwrap();
//! assert!(json.contains("11111111"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the [`calculations::ToolInput`] dispatcher
//! - [`units`] - Unit conversion tables
//! - [`format`] - Display rounding and number formatting
//! - [`settings`] - Calculator configuration
//! - [`errors`] - Structured error types
//! - [`file_io`] - Input files, atomic writes, settings files

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ToolInput, ToolOutput};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_settings, read_text, save_settings, write_text_atomic};
pub use settings::Settings;
