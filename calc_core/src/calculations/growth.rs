//! # Compound Growth (CAGR)
//!
//! Compound annual growth rate and related return figures for an investment
//! that grew from `start_value` to `end_value` over a holding period.
//!
//! ## Formulas
//!
//! ```text
//! total_years = years + months / 12 + days / 365
//! CAGR        = (end / start)^(1 / total_years) - 1
//! total       = (end - start) / start
//! simple      = total / total_years
//! multiple    = end / start
//! doubling    = ln 2 / ln(1 + CAGR)          (only when CAGR > 0)
//! ```
//!
//! The flat 365-day year is intentional and matches the published tool.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::growth::{calculate, GrowthInput, Period};
//!
//! let input = GrowthInput {
//!     start_value: 10_000.0,
//!     end_value: 15_000.0,
//!     period: Period::Duration { years: 5.0, months: 0.0, days: 0.0 },
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.cagr_percent - 8.447).abs() < 0.001);
//! ```

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Days per year used when converting a day count into years
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Date format accepted by [`parse_date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Holding period of the investment.
///
/// ## JSON Examples
///
/// ```json
/// { "kind": "duration", "years": 5, "months": 6, "days": 0 }
/// { "kind": "dates", "start": "2019-01-15", "end": "2024-07-15" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    /// Explicit years / months / days
    Duration {
        #[serde(default)]
        years: f64,
        #[serde(default)]
        months: f64,
        #[serde(default)]
        days: f64,
    },
    /// Span between two calendar dates
    Dates { start: NaiveDate, end: NaiveDate },
}

/// Period decomposed into calendar parts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub years: f64,
    pub months: f64,
    pub days: f64,
}

impl PeriodBreakdown {
    /// Fractional years using 12 months and 365 days per year
    pub fn total_years(&self) -> f64 {
        self.years + self.months / 12.0 + self.days / DAYS_PER_YEAR
    }
}

impl Period {
    /// Decompose into years, months and days.
    ///
    /// For date spans the decomposition is calendar-aware: whole years first,
    /// then whole months, then the remaining days. Adding months to a day
    /// that does not exist in the target month clamps to the month's end.
    pub fn breakdown(&self) -> CalcResult<PeriodBreakdown> {
        match *self {
            Period::Duration { years, months, days } => {
                for (field, v) in [("years", years), ("months", months), ("days", days)] {
                    if !v.is_finite() || v < 0.0 {
                        return Err(CalcError::invalid_input(
                            field,
                            v.to_string(),
                            "Period parts must be zero or positive",
                        ));
                    }
                }
                Ok(PeriodBreakdown { years, months, days })
            }
            Period::Dates { start, end } => date_breakdown(start, end),
        }
    }
}

fn date_breakdown(start: NaiveDate, end: NaiveDate) -> CalcResult<PeriodBreakdown> {
    if end < start {
        return Err(CalcError::invalid_input(
            "end",
            end.to_string(),
            format!("End date must not be before start date {}", start),
        ));
    }

    let mut total_months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut anchor = add_months(start, total_months)?;
    if anchor > end {
        total_months -= 1;
        anchor = add_months(start, total_months)?;
    }
    let days = (end - anchor).num_days();

    Ok(PeriodBreakdown {
        years: (total_months / 12) as f64,
        months: (total_months % 12) as f64,
        days: days as f64,
    })
}

fn add_months(date: NaiveDate, months: i32) -> CalcResult<NaiveDate> {
    let months = u32::try_from(months.max(0)).unwrap_or(0);
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CalcError::invalid_input("end", date.to_string(), "Date is out of range"))
}

/// Parse a `YYYY-MM-DD` date typed into a form field.
pub fn parse_date(field: &str, text: &str) -> CalcResult<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| CalcError::invalid_number(field, trimmed))
}

/// Input parameters for the CAGR calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "start_value": 10000.0,
///   "end_value": 15000.0,
///   "period": { "kind": "duration", "years": 5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthInput {
    /// Value at the beginning of the period
    pub start_value: f64,

    /// Value at the end of the period
    pub end_value: f64,

    /// Holding period
    pub period: Period,
}

impl GrowthInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.start_value.is_finite() || self.start_value <= 0.0 {
            return Err(CalcError::invalid_input(
                "start_value",
                self.start_value.to_string(),
                "Starting value must be greater than zero",
            ));
        }
        if !self.end_value.is_finite() || self.end_value <= 0.0 {
            return Err(CalcError::invalid_input(
                "end_value",
                self.end_value.to_string(),
                "Ending value must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Results from the CAGR calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// Period parts the figures were computed from
    pub period: PeriodBreakdown,

    /// Fractional holding period in years
    pub total_years: f64,

    /// Compound annual growth rate as a ratio (0.08447 = 8.447%)
    pub cagr: f64,

    /// CAGR in percent
    pub cagr_percent: f64,

    /// (end - start) / start in percent
    pub total_return_percent: f64,

    /// Total return divided by total years, in percent
    pub simple_annual_return_percent: f64,

    /// end / start
    pub return_multiple: f64,

    /// Years needed to double at the CAGR; `None` when CAGR <= 0
    pub doubling_time_years: Option<f64>,
}

/// Calculate CAGR and the derived return figures.
///
/// # Returns
///
/// * `Ok(GrowthResult)` - Calculation results
/// * `Err(CalcError::InvalidInput)` - Non-positive values or a zero-length period
pub fn calculate(input: &GrowthInput) -> CalcResult<GrowthResult> {
    input.validate()?;

    let period = input.period.breakdown()?;
    let total_years = period.total_years();
    if total_years <= 0.0 {
        return Err(CalcError::invalid_input(
            "period",
            total_years.to_string(),
            "Investment period must be longer than zero",
        ));
    }

    let return_multiple = input.end_value / input.start_value;
    let cagr = return_multiple.powf(1.0 / total_years) - 1.0;
    let total_return = return_multiple - 1.0;

    debug!(total_years, cagr, "compound growth");

    Ok(GrowthResult {
        period,
        total_years,
        cagr,
        cagr_percent: cagr * 100.0,
        total_return_percent: total_return * 100.0,
        simple_annual_return_percent: total_return / total_years * 100.0,
        return_multiple,
        doubling_time_years: doubling_time(cagr),
    })
}

/// Years to double at a constant annual `rate`; `None` unless the rate is positive.
pub fn doubling_time(rate: f64) -> Option<f64> {
    if rate > 0.0 && rate.is_finite() {
        Some(std::f64::consts::LN_2 / rate.ln_1p())
    } else {
        None
    }
}

/// Value of `start` after `years` of compounding at annual `rate`.
pub fn project_value(start: f64, rate: f64, years: f64) -> f64 {
    start * (1.0 + rate).powf(years)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn zero_cagr_iff_unchanged(start in 1.0_f64..1.0e6, years in 0.5_f64..40.0) {
            let input = GrowthInput {
                start_value: start,
                end_value: start,
                period: Period::Duration { years, months: 0.0, days: 0.0 },
            };
            let result = calculate(&input).unwrap();
            prop_assert_eq!(result.cagr, 0.0);
        }

        #[test]
        fn doubling_time_doubles(start in 1.0_f64..1.0e6, rate in 0.001_f64..1.0) {
            let t = doubling_time(rate).unwrap();
            let doubled = project_value(start, rate, t);
            prop_assert!((doubled - 2.0 * start).abs() <= 1e-9 * start);
        }
    }
}
