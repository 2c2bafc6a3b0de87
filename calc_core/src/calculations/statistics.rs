//! # Descriptive Statistics
//!
//! Summary statistics (mean, median, mode, quartiles, outliers, spread) for a
//! list of numbers typed as free-form text.
//!
//! ## Parsing
//!
//! Values may be separated by commas, semicolons, spaces, tabs or newlines
//! in any mix. A single unreadable token fails the whole computation with
//! [`CalcError::InvalidNumber`] naming that token. Blank input is not an
//! error; it produces the zero-valued [`Statistics::default`].
//!
//! ## Quartiles
//!
//! Q1 and Q3 sit at the 1-based positions `(n + 1) / 4` and `3(n + 1) / 4`
//! of the sorted data. Fractional positions interpolate linearly between the
//! neighbouring entries; positions outside `1..=n` clamp to the ends. Q2 is
//! the median. Outliers are values outside `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::statistics::describe_text;
//!
//! let stats = describe_text("5, 8 12;14\n17").unwrap();
//! assert_eq!(stats.count, 5);
//! assert_eq!(stats.median, 12.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Multiplier applied to the IQR when computing outlier fences
pub const OUTLIER_IQR_FACTOR: f64 = 1.5;

/// Input for the statistics calculator.
///
/// ## JSON Example
///
/// ```json
/// { "data": "5, 8, 12, 14, 17" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsInput {
    /// Delimited list of numbers as typed by the user
    pub data: String,
}

/// Results from the statistics calculator.
///
/// Every field is order-independent: shuffling the input yields the same
/// record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of values
    pub count: usize,

    /// Sum of all values
    pub sum: f64,

    /// Arithmetic mean (sum / count)
    pub mean: f64,

    /// Middle value, or mean of the two middle values for even counts
    pub median: f64,

    /// Most frequent value(s), ascending. Empty when every value is unique.
    pub mode: Vec<f64>,

    /// Occurrences of each modal value (0 when there is no mode)
    pub mode_frequency: usize,

    /// Smallest value
    pub min: f64,

    /// Largest value
    pub max: f64,

    /// max - min
    pub range: f64,

    /// First quartile
    pub q1: f64,

    /// Third quartile
    pub q3: f64,

    /// Interquartile range Q3 - Q1
    pub iqr: f64,

    /// Q1 - 1.5 IQR
    pub lower_fence: f64,

    /// Q3 + 1.5 IQR
    pub upper_fence: f64,

    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,

    /// Population variance (divide by n)
    pub population_variance: f64,

    /// Population standard deviation
    pub population_std_dev: f64,

    /// Sample variance (divide by n - 1); 0 when n < 2
    pub sample_variance: f64,

    /// Sample standard deviation; 0 when n < 2
    pub sample_std_dev: f64,
}

impl Statistics {
    /// True when the input contained no values
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when at least one value repeats more often than the others
    pub fn has_mode(&self) -> bool {
        !self.mode.is_empty()
    }
}

/// Split delimited text into numbers.
pub fn parse_numbers(text: &str) -> CalcResult<Vec<f64>> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => {
                debug!(token, "rejected statistics token");
                Err(CalcError::invalid_number("data", token))
            }
        })
        .collect()
}

/// Parse `text` and describe it.
pub fn describe_text(text: &str) -> CalcResult<Statistics> {
    let values = parse_numbers(text)?;
    describe(&values)
}

/// Run the calculator on a [`StatisticsInput`].
pub fn calculate(input: &StatisticsInput) -> CalcResult<Statistics> {
    let stats = describe_text(&input.data)?;
    debug!(count = stats.count, mean = stats.mean, "descriptive statistics");
    Ok(stats)
}

/// Describe an in-memory slice of finite values.
///
/// Values so large that the sum, spread or variance overflows `f64` are
/// rejected rather than reported as infinite.
pub fn describe(values: &[f64]) -> CalcResult<Statistics> {
    if values.is_empty() {
        return Ok(Statistics::default());
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let count = n as f64;
    // Summing the sorted copy keeps the result independent of input order.
    let sum: f64 = sorted.iter().sum();
    let mean = sum / count;

    let min = sorted[0];
    let max = sorted[n - 1];
    let median = median_of_sorted(&sorted);
    let q1 = quartile_of_sorted(&sorted, 1);
    let q3 = quartile_of_sorted(&sorted, 3);
    let iqr = q3 - q1;
    let lower_fence = q1 - OUTLIER_IQR_FACTOR * iqr;
    let upper_fence = q3 + OUTLIER_IQR_FACTOR * iqr;
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower_fence || *v > upper_fence)
        .collect();

    let (mode, mode_frequency) = mode_of_sorted(&sorted);

    let squared_dev: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
    let population_variance = squared_dev / count;
    let sample_variance = if n > 1 { squared_dev / (count - 1.0) } else { 0.0 };

    let derived = [sum, max - min, lower_fence, upper_fence, squared_dev];
    if derived.iter().any(|v| !v.is_finite()) {
        debug!(count = n, "statistics overflowed");
        return Err(CalcError::invalid_input(
            "data",
            format!("{} values", n),
            "Values are too large to summarize",
        ));
    }

    Ok(Statistics {
        count: n,
        sum,
        mean,
        median,
        mode,
        mode_frequency,
        min,
        max,
        range: max - min,
        q1,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        outliers,
        population_variance,
        population_std_dev: population_variance.sqrt(),
        sample_variance,
        sample_std_dev: sample_variance.sqrt(),
    })
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Quartile `k` (1 or 3) by the `(n + 1)` position method.
fn quartile_of_sorted(sorted: &[f64], k: usize) -> f64 {
    let n = sorted.len();
    let position = (k * (n + 1)) as f64 / 4.0;
    if position <= 1.0 {
        return sorted[0];
    }
    if position >= n as f64 {
        return sorted[n - 1];
    }
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    let below = sorted[lower - 1];
    let above = sorted[lower];
    below + fraction * (above - below)
}

fn mode_of_sorted(sorted: &[f64]) -> (Vec<f64>, usize) {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &v in sorted {
        match runs.last_mut() {
            Some((value, freq)) if *value == v => *freq += 1,
            _ => runs.push((v, 1)),
        }
    }

    // Every value distinct: no mode.
    if runs.len() == sorted.len() {
        return (Vec::new(), 0);
    }

    let best = runs.iter().map(|(_, f)| *f).max().unwrap_or(0);
    let modes = runs
        .iter()
        .filter(|(_, f)| *f == best)
        .map(|(v, _)| *v)
        .collect();
    (modes, best)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn quartiles_are_ordered(values in prop::collection::vec(-1.0e6_f64..1.0e6, 1..60)) {
            let s = describe(&values).unwrap();
            prop_assert!(s.min <= s.q1);
            prop_assert!(s.q1 <= s.median);
            prop_assert!(s.median <= s.q3);
            prop_assert!(s.q3 <= s.max);
        }

        #[test]
        fn mean_is_sum_over_count(values in prop::collection::vec(-1.0e6_f64..1.0e6, 1..60)) {
            let s = describe(&values).unwrap();
            prop_assert_eq!(s.mean, s.sum / s.count as f64);
        }

        #[test]
        fn order_does_not_matter(values in prop::collection::vec(-1.0e3_f64..1.0e3, 0..40)) {
            let mut sorted = values.clone();
            sorted.sort_by(f64::total_cmp);
            let mut reversed = sorted.clone();
            reversed.reverse();
            prop_assert_eq!(describe(&values).unwrap(), describe(&sorted).unwrap());
            prop_assert_eq!(describe(&values).unwrap(), describe(&reversed).unwrap());
        }
    }
}
