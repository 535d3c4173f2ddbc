//! Flat-rate date differences.
//!
//! Every unit has a fixed length in seconds: a month is always 30 days and a
//! year always 365 days. Results are rounded to the nearest integer, ties to
//! even. Month and year differences are therefore approximations, not
//! calendar counts.

use std::fmt;
use std::str::FromStr;

use crate::date::Date;
use crate::error::ConversionError;

const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Unit of a date difference.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    /// 30 days.
    Month,
    /// 365 days.
    Year,
}

impl Unit {
    /// Fixed length of the unit in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            Unit::Second => 1,
            Unit::Minute => 60,
            Unit::Hour => 3600,
            Unit::Day => SECONDS_PER_DAY,
            Unit::Month => 30 * SECONDS_PER_DAY,
            Unit::Year => 365 * SECONDS_PER_DAY,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Month => "month",
            Unit::Year => "year",
        })
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    /// Parses a unit tag, ignoring ASCII case. `"date"` is accepted as an
    /// alias of `"day"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "second" => Unit::Second,
            "minute" => Unit::Minute,
            "hour" => Unit::Hour,
            "day" | "date" => Unit::Day,
            "month" => Unit::Month,
            "year" => Unit::Year,
            _ => {
                return Err(ConversionError::UnsupportedUnit { unit: s.to_owned() });
            }
        })
    }
}

/// Returns `a - b` measured in `unit`, rounded to the nearest integer.
///
/// # Example
///
/// ```
/// use nongli::Date;
/// use nongli::math::{solar_diff, Unit};
///
/// let a = Date::from_gregorian(2020, 1, 1).unwrap();
/// let b = Date::from_gregorian(2019, 1, 1).unwrap();
/// assert_eq!(365, solar_diff(a, b, Unit::Day));
/// assert_eq!(12, solar_diff(a, b, Unit::Month));
/// assert_eq!(1, solar_diff(a, b, Unit::Year));
/// ```
pub fn solar_diff(a: Date, b: Date, unit: Unit) -> i64 {
    let seconds = (i64::from(a.jdn()) - i64::from(b.jdn())) * SECONDS_PER_DAY;
    (seconds as f64 / unit.seconds() as f64).round_ties_even() as i64
}

/// Decodes two `YYYYMMDD` codes and returns `a - b` in `unit`.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidDate`] if either code names no real
/// Gregorian day. Codes are not normalised the way a lenient calendar
/// would: `20190230` is rejected rather than rolled over to `20190302`.
pub fn date_code_diff(a: u32, b: u32, unit: Unit) -> Result<i64, ConversionError> {
    let decode = |code| Date::from_code(code).ok_or(ConversionError::InvalidDate { code });
    Ok(solar_diff(decode(a)?, decode(b)?, unit))
}
