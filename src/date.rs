//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};

/// A calendar-independant date, stored as a Julian day number.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
/// Solar (Gregorian) dates used by the lunar converter are constructed with
/// [`Date::from_gregorian`] or [`Date::from_code`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub const fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not name a real day of that
    /// year, or if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_gregorian(2019, 2, 29).is_none());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let max_day = days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return None;
        }
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Encodes the Gregorian date as a sortable `YYYYMMDD` integer.
    ///
    /// Years before 1 CE have no code and encode with year `0`. Codes past
    /// year 429,495 do not fit in `u32` and saturate to `u32::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2019, 7, 22).unwrap();
    /// assert_eq!(20190722, date.code());
    /// ```
    pub fn code(&self) -> u32 {
        let (y, m, d) = self.gregorian();
        (y.max(0) as u32)
            .saturating_mul(10000)
            .saturating_add(m as u32 * 100 + d as u32)
    }
    /// Decodes a `YYYYMMDD` integer produced by [`Date::code`].
    ///
    /// Returns `None` if the code does not name a real Gregorian day.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_gregorian(
            (code / 10000) as i32,
            (code / 100 % 100) as i32,
            (code % 100) as i32,
        )
    }

    /// Adds `days` days. Returns `None` when leaving the representable range.
    pub fn add_days(self, days: i32) -> Option<Self> {
        let jdn = i64::from(self.jdn) + i64::from(days);
        u32::try_from(jdn).ok().map(Self::from_jdn)
    }
    /// Adds `months` Gregorian months.
    ///
    /// If the day of month does not exist in the target month it is clamped
    /// to that month's last day.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2019, 1, 31).unwrap();
    /// assert_eq!("2019-02-28", date.add_months(1).unwrap().iso_gregorian());
    /// ```
    pub fn add_months(self, months: i32) -> Option<Self> {
        let (y, m, d) = self.gregorian();
        let total = i64::from(y) * 12 + i64::from(m - 1) + i64::from(months);
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = total.rem_euclid(12) as i32 + 1;
        let day = d.min(days_in_month(year, month)?);
        Self::from_gregorian(year, month, day)
    }
    /// Adds `years` Gregorian years. February 29 becomes February 28 in a
    /// common year.
    pub fn add_years(self, years: i32) -> Option<Self> {
        self.add_months(years.checked_mul(12)?)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, or `None` if `month` is not in
/// `1..=12`.
pub fn days_in_month(year: i32, month: i32) -> Option<i32> {
    Some(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
    }

    #[test]
    fn from_gregorian_rejects_impossible_days() {
        for (y, m, d) in [
            (2019, 0, 1),
            (2019, 13, 1),
            (2019, 4, 31),
            (2019, 2, 29),
            (1900, 2, 29),
            (2019, 7, 0),
        ] {
            assert_eq!(None, Date::from_gregorian(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
        assert!(Date::from_gregorian(2000, 2, 29).is_some());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn codes() {
        let date = Date::from_gregorian(1900, 1, 31).unwrap();
        assert_eq!(19000131, date.code());
        assert_eq!(Some(date), Date::from_code(19000131));
        assert_eq!(None, Date::from_code(19001320));
        assert_eq!(None, Date::from_code(20190230));
        assert_eq!(u32::MAX, Date::from_jdn(u32::MAX).code());
    }

    #[test]
    fn far_future_is_unrepresentable() {
        assert_eq!(None, Date::from_gregorian(100_000_000, 1, 1));
        assert_eq!(None, Date::from_gregorian(i32::MAX, 12, 31));
        let date = Date::from_gregorian(2019, 7, 22).unwrap();
        assert_eq!(None, date.add_months(i32::MAX));
        assert_eq!(None, date.add_months(i32::MIN));
        assert_eq!(None, date.add_years(100_000_000));
    }

    #[test]
    fn add_days_across_year_end() {
        let date = Date::from_gregorian(2019, 12, 31).unwrap();
        assert_eq!("2020-01-01", date.add_days(1).unwrap().iso_gregorian());
        assert_eq!("2019-12-01", date.add_days(-30).unwrap().iso_gregorian());
        assert_eq!(None, Date::from_jdn(0).add_days(-1));
    }

    #[test]
    fn add_months_clamps_day() {
        let date = Date::from_gregorian(2020, 1, 31).unwrap();
        for (n, expected) in [
            (1, "2020-02-29"),
            (2, "2020-03-31"),
            (3, "2020-04-30"),
            (-1, "2019-12-31"),
            (-2, "2019-11-30"),
            (13, "2021-02-28"),
        ] {
            assert_eq!(expected, date.add_months(n).unwrap().iso_gregorian(), "{n}");
        }
    }

    #[test]
    fn add_years_from_leap_day() {
        let date = Date::from_gregorian(2020, 2, 29).unwrap();
        assert_eq!("2021-02-28", date.add_years(1).unwrap().iso_gregorian());
        assert_eq!("2024-02-29", date.add_years(4).unwrap().iso_gregorian());
    }

    #[test]
    fn ops() {
        let a = Date::from_gregorian(2019, 7, 22).unwrap();
        let b = a + 10;
        assert_eq!("2019-08-01", b.iso_gregorian());
        assert_eq!(10, b - a);
        assert_eq!(a, b + -10);
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().to_string()
        );
    }

    #[test]
    fn month_lengths() {
        assert_eq!(Some(29), days_in_month(2000, 2));
        assert_eq!(Some(28), days_in_month(1900, 2));
        assert_eq!(Some(31), days_in_month(2150, 12));
        assert_eq!(None, days_in_month(2150, 13));
    }
}
