//! # Generation Lookup
//!
//! Maps a birth year to a generation name using a table of inclusive year
//! ranges. The table is configuration data ([`crate::settings::Settings::generations`]);
//! [`default_generations`] holds the commonly cited boundaries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// One named generation and its inclusive birth-year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRange {
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl GenerationRange {
    pub fn new(name: impl Into<String>, start_year: i32, end_year: i32) -> Self {
        GenerationRange {
            name: name.into(),
            start_year,
            end_year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

/// Built-in generation table, oldest first
pub fn default_generations() -> Vec<GenerationRange> {
    vec![
        GenerationRange::new("Greatest Generation", 1901, 1927),
        GenerationRange::new("Silent Generation", 1928, 1945),
        GenerationRange::new("Baby Boomers", 1946, 1964),
        GenerationRange::new("Generation X", 1965, 1980),
        GenerationRange::new("Millennials", 1981, 1996),
        GenerationRange::new("Generation Z", 1997, 2012),
        GenerationRange::new("Generation Alpha", 2013, 2024),
    ]
}

/// Input for the generation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationInput {
    pub birth_year: i32,
}

/// Matched generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub generation: GenerationRange,
    /// Position of the birth year inside the range (1 = first year)
    pub year_in_range: i32,
    /// Length of the range in years
    pub range_years: i32,
}

/// Check that ranges are well formed and do not overlap.
pub fn validate_table(table: &[GenerationRange]) -> CalcResult<()> {
    for (i, g) in table.iter().enumerate() {
        if g.start_year > g.end_year {
            return Err(CalcError::invalid_input(
                "generations",
                &g.name,
                "Range starts after it ends",
            ));
        }
        if let Some(other) = table[..i]
            .iter()
            .find(|o| o.start_year <= g.end_year && g.start_year <= o.end_year)
        {
            return Err(CalcError::invalid_input(
                "generations",
                format!("{} / {}", other.name, g.name),
                "Generation ranges overlap",
            ));
        }
    }
    Ok(())
}

/// Find the generation for `birth_year`. Years outside the table yield `Ok(None)`.
pub fn calculate(input: &GenerationInput, table: &[GenerationRange]) -> CalcResult<Option<GenerationResult>> {
    validate_table(table)?;
    let found = table.iter().find(|g| g.contains(input.birth_year));
    debug!(birth_year = input.birth_year, found = found.is_some(), "generation lookup");
    Ok(found.map(|g| GenerationResult {
        generation: g.clone(),
        year_in_range: input.birth_year - g.start_year + 1,
        range_years: g.end_year - g.start_year + 1,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let table = default_generations();
        let r = calculate(&GenerationInput { birth_year: 1990 }, &table).unwrap().unwrap();
        assert_eq!(r.generation.name, "Millennials");
        assert_eq!(r.year_in_range, 10);
        assert_eq!(r.range_years, 16);
    }

    #[test]
    fn test_boundaries_inclusive() {
        let table = default_generations();
        let name = |y| calculate(&GenerationInput { birth_year: y }, &table).unwrap().unwrap().generation.name;
        assert_eq!(name(1964), "Baby Boomers");
        assert_eq!(name(1965), "Generation X");
    }

    #[test]
    fn test_outside_table() {
        assert_eq!(calculate(&GenerationInput { birth_year: 1850 }, &default_generations()).unwrap(), None);
    }

    #[test]
    fn test_default_table_valid() {
        validate_table(&default_generations()).unwrap();
    }

    #[test]
    fn test_overlap_rejected() {
        let table = vec![GenerationRange::new("A", 1900, 1950), GenerationRange::new("B", 1950, 1960)];
        assert!(validate_table(&table).is_err());
    }
}
