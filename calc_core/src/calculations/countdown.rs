//! # Christmas Countdown
//!
//! Time remaining until the next 25 December 00:00, measured from an
//! explicit reference time so the calculation stays pure. Callers pass the
//! current local time (`chrono::Local::now().naive_local()`).
//!
//! On Christmas Day itself the countdown is zero and `is_christmas` is set.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

const CHRISTMAS_MONTH: u32 = 12;
const CHRISTMAS_DAY: u32 = 25;

/// Input for the countdown.
///
/// ## JSON Example
///
/// ```json
/// { "now": "2026-12-24T18:00:00" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownInput {
    /// Reference local date-time
    pub now: NaiveDateTime,
}

/// Remaining time broken into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownResult {
    /// Year of the Christmas being counted down to
    pub target_year: i32,
    /// True on 25 December
    pub is_christmas: bool,
    pub total_seconds: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

fn christmas(year: i32) -> CalcResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, CHRISTMAS_MONTH, CHRISTMAS_DAY)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CalcError::invalid_input("now", year.to_string(), "Year is out of range"))
}

/// Count down from `input.now` to the next Christmas.
pub fn calculate(input: &CountdownInput) -> CalcResult<CountdownResult> {
    let now = input.now;
    let is_christmas = now.month() == CHRISTMAS_MONTH && now.day() == CHRISTMAS_DAY;

    let target = if is_christmas {
        christmas(now.year())?
    } else {
        let this_year = christmas(now.year())?;
        if now < this_year {
            this_year
        } else {
            christmas(now.year() + 1)?
        }
    };

    let total_seconds = if is_christmas { 0 } else { (target - now).num_seconds() };
    debug!(target_year = target.year(), total_seconds, "christmas countdown");

    Ok(CountdownResult {
        target_year: target.year(),
        is_christmas,
        total_seconds,
        days: total_seconds / 86_400,
        hours: total_seconds % 86_400 / 3_600,
        minutes: total_seconds % 3_600 / 60,
        seconds: total_seconds % 60,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> CountdownInput {
        CountdownInput {
            now: NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap(),
        }
    }

    #[test]
    fn test_christmas_eve_evening() {
        let r = calculate(&at(2026, 12, 24, 18, 0, 0)).unwrap();
        assert_eq!(r.target_year, 2026);
        assert_eq!((r.days, r.hours, r.minutes, r.seconds), (0, 6, 0, 0));
        assert!(!r.is_christmas);
    }

    #[test]
    fn test_breakdown() {
        let r = calculate(&at(2026, 12, 1, 22, 58, 30)).unwrap();
        assert_eq!((r.days, r.hours, r.minutes, r.seconds), (23, 1, 1, 30));
        assert_eq!(r.total_seconds, 23 * 86_400 + 3_600 + 60 + 30);
    }

    #[test]
    fn test_christmas_day() {
        let r = calculate(&at(2026, 12, 25, 9, 30, 0)).unwrap();
        assert!(r.is_christmas);
        assert_eq!(r.total_seconds, 0);
        assert_eq!(r.target_year, 2026);
    }

    #[test]
    fn test_after_christmas_rolls_over() {
        let r = calculate(&at(2026, 12, 26, 0, 0, 0)).unwrap();
        assert_eq!(r.target_year, 2027);
        assert_eq!(r.days, 364);
    }

    #[test]
    fn test_leap_year_span() {
        // 2027-12-26 to 2028-12-25 crosses 29 Feb 2028.
        let r = calculate(&at(2027, 12, 26, 0, 0, 0)).unwrap();
        assert_eq!(r.days, 365);
    }
}
