//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序依預製的月首表（見 [`table`]）在公曆與農曆間互相換算，支持農曆
//! 1900 至 2150 年。月首表為權威資料，不作天文推算。
//!
//! 公曆日期與農曆日期以 [`LunarDate`] 一併保存，兩者始終一一對應。

use tracing::{debug, trace};

use crate::date::{self, Date};
use crate::error::{Component, ConversionError};
use crate::math::{self, Unit};

pub mod fmt;
pub mod table;

pub use table::{MAX_YEAR, MIN_YEAR};

/// 可換算的首個公曆日期，1900-01-31（農曆 1900 年正月初一）。
pub const FIRST_SOLAR_DATE: Date = Date::from_jdn(2415051);
/// 可換算的末個公曆日期，2150-12-31。
pub const LAST_SOLAR_DATE: Date = Date::from_jdn(2506696);

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Month {
    Common(u8),
    Leap(u8),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u8 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「腊月」。
    ///
    /// 月序號不在 `1..=12` 間則返回錯誤。
    pub fn name(&self) -> Result<String, ConversionError> {
        fmt::month(*self)
    }
}

/// 日期推移的單位，見 [`advance`]。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    Day,
    Week,
    /// 公曆月；目標月無該日時取月末。
    Month,
    /// 公曆年；二月二十九日遇平年取二十八日。
    Year,
}

/// 已換算的農曆日期，同時保存對應的公曆日期。
///
/// 只能經由換算函數或 [`LunarDate::advance`] 得到，兩種表示始終一致。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{LunarDate, Month::*};
///
/// let date = LunarDate::from_lunar(2017, 6, 1, true).unwrap();
/// assert_eq!(Leap(6), date.lunar_month());
/// assert_eq!("2017-07-23", date.solar().iso_gregorian());
/// assert_eq!("二〇一七年闰六月初一", date.to_string());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LunarDate {
    year: i32,
    month: Month,
    day: u8,
    solar: Date,
}

impl LunarDate {
    /// 農曆年
    pub fn year(&self) -> i32 {
        self.year
    }
    /// 農曆月序號（`1..=12`），無論平閏
    pub fn month(&self) -> u8 {
        self.month.num()
    }
    /// 農曆月，含平閏
    pub fn lunar_month(&self) -> Month {
        self.month
    }
    /// 農曆日（`1..=30`）
    pub fn day(&self) -> u8 {
        self.day
    }
    /// 是否閏月
    pub fn is_leap_month(&self) -> bool {
        self.month.is_leap()
    }
    /// 對應的公曆日期
    pub fn solar(&self) -> Date {
        self.solar
    }

    /// 由公曆日期換算。
    ///
    /// # 錯誤
    ///
    /// 日期不在 [`FIRST_SOLAR_DATE`]..=[`LAST_SOLAR_DATE`] 間則返回
    /// [`ConversionError::OutOfRange`]；表中資料不一致則返回
    /// [`ConversionError::InvalidDate`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::Date;
    /// use nongli::chinese::{LunarDate, Month::*};
    ///
    /// let date = LunarDate::from_solar(Date::from_gregorian(2000, 1, 1).unwrap()).unwrap();
    /// assert_eq!((1999, Common(11), 25), (date.year(), date.lunar_month(), date.day()));
    /// ```
    pub fn from_solar(solar: Date) -> Result<Self, ConversionError> {
        let (year, _, _) = solar.gregorian();
        let record = table::lookup(year)?;
        let code = solar.code();
        let codes = record.solar_codes();
        // 月首不晚於 `code` 的格數，亦即所在格序（自 1 起）；0 表示早於本年正月
        let slot = codes.partition_point(|&start| start <= code);

        if slot == 0 {
            return Self::from_previous_year(solar, year);
        }
        let offset = math::date_code_diff(code, codes[slot - 1], Unit::Day)?;
        if slot == codes.len() && offset >= 30 {
            return Self::from_next_year(solar, year);
        }
        Ok(LunarDate {
            year,
            month: record.month_at(slot),
            day: day_from_offset(offset, code)?,
            solar,
        })
    }

    /// 日期早於本年正月初一，屬前一年的冬月或腊月（或其閏月）。
    fn from_previous_year(solar: Date, year: i32) -> Result<Self, ConversionError> {
        let code = solar.code();
        let record = table::lookup(year - 1).map_err(|_| solar_out_of_range(code))?;
        let last = record.month_count();
        for slot in [last, last - 1] {
            let start = record.starts()[slot - 1];
            if start <= solar {
                let offset = math::date_code_diff(code, start.code(), Unit::Day)?;
                let month = record.month_at(slot);
                trace!(%solar, ?month, "resolved in previous lunar year");
                return Ok(LunarDate {
                    year: year - 1,
                    month,
                    day: day_from_offset(offset, code)?,
                    solar,
                });
            }
        }
        debug!(%solar, "date precedes the last two months of the previous lunar year");
        Err(ConversionError::InvalidDate { code })
    }

    /// 日期晚於本年腊月，屬次年正月。
    fn from_next_year(solar: Date, year: i32) -> Result<Self, ConversionError> {
        let code = solar.code();
        let record = table::lookup(year + 1).map_err(|_| solar_out_of_range(code))?;
        let offset = math::date_code_diff(code, record.solar_codes()[0], Unit::Day)?;
        trace!(%solar, "resolved in next lunar year");
        Ok(LunarDate {
            year: year + 1,
            month: Month::Common(1),
            day: day_from_offset(offset, code)?,
            solar,
        })
    }

    /// 由農曆日期換算。
    ///
    /// # 錯誤
    ///
    /// 年、月不在表列範圍，或日數超出該月日數，返回
    /// [`ConversionError::OutOfRange`]；`is_leap` 所指月份並非該年閏月則返回
    /// [`ConversionError::NotLeapMonth`]。
    pub fn from_lunar(year: i32, month: u8, day: u8, is_leap: bool) -> Result<Self, ConversionError> {
        let record = table::lookup(year)?;
        if !(1..=12).contains(&month) {
            debug!(year, month, "lunar month out of range");
            return Err(ConversionError::out_of_range(
                Component::Month,
                month.into(),
                1,
                12,
            ));
        }
        if is_leap && record.leap_month != month {
            debug!(year, month, "requested leap month does not exist");
            return Err(ConversionError::NotLeapMonth { year, month });
        }
        let slot = record.slot_of(if is_leap {
            Month::Leap(month)
        } else {
            Month::Common(month)
        });
        let len = record.month_len(slot).unwrap_or(30);
        if !(1..=len).contains(&i32::from(day)) {
            debug!(year, month, day, len, "lunar day out of range");
            return Err(ConversionError::out_of_range(
                Component::Day,
                day.into(),
                1,
                len,
            ));
        }
        let solar = record.starts()[slot - 1] + (i32::from(day) - 1);
        if solar > LAST_SOLAR_DATE {
            return Err(solar_out_of_range(solar.code()));
        }
        // 由公曆側重算農曆側，確保兩者一致
        Self::from_solar(solar)
    }

    /// 將公曆側推移 `amount` 個 `field` 單位，再重算農曆側。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::chinese::{self, Field};
    ///
    /// let date = chinese::solar_to_lunar(2019, 7, 22).unwrap();
    /// let next = date.advance(Field::Day, 1).unwrap();
    /// assert_eq!("2019-07-23", next.solar().iso_gregorian());
    /// assert_eq!((6, 21), (next.month(), next.day()));
    /// ```
    pub fn advance(&self, field: Field, amount: i32) -> Result<Self, ConversionError> {
        let solar = match field {
            Field::Day => self.solar.add_days(amount),
            Field::Week => amount
                .checked_mul(7)
                .and_then(|days| self.solar.add_days(days)),
            Field::Month => self.solar.add_months(amount),
            Field::Year => self.solar.add_years(amount),
        };
        match solar {
            Some(solar) => Self::from_solar(solar),
            None => {
                debug!(?field, amount, "advance left the representable range");
                Err(solar_out_of_range(self.solar.code()))
            }
        }
    }

    /// 兩日期之差，按 [`math::solar_diff`] 的固定單位長度計算。
    pub fn diff(&self, other: &LunarDate, unit: Unit) -> i64 {
        math::solar_diff(self.solar, other.solar, unit)
    }

    /// 不含年份的農曆日期，如「六月廿十」。`show_leap` 為 `true` 時閏月前加「闰」。
    pub fn lunar_name(&self, show_leap: bool) -> String {
        let leap = if show_leap && self.is_leap_month() {
            fmt::LEAP_MARK
        } else {
            ""
        };
        format!(
            "{leap}{}月{}",
            fmt::MONTH_NAMES[usize::from(self.month() - 1)],
            fmt::DAY_NAMES[usize::from(self.day - 1)]
        )
    }

    /// 農曆全稱，見 [`fmt::full_name`]。
    pub fn full_name(&self) -> String {
        fmt::full_name(self)
    }
}

impl std::fmt::Display for LunarDate {
    /// 形如「二〇一九年六月廿十」。
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let year = fmt::year_name(self.year).map_err(|_| std::fmt::Error)?;
        write!(f, "{year}年{}", self.lunar_name(true))
    }
}

/// 公曆年月日換算為農曆。
///
/// # 錯誤
///
/// 年份不在表列範圍，或月、日並非該年實有日期，返回
/// [`ConversionError::OutOfRange`]。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{self, Month::*};
///
/// let date = chinese::solar_to_lunar(2017, 7, 23).unwrap();
/// assert_eq!((2017, Leap(6), 1), (date.year(), date.lunar_month(), date.day()));
/// assert!(chinese::solar_to_lunar(1899, 12, 31).is_err());
/// ```
pub fn solar_to_lunar(year: i32, month: u8, day: u8) -> Result<LunarDate, ConversionError> {
    table::lookup(year)?;
    let month_len = date::days_in_month(year, month.into()).ok_or_else(|| {
        ConversionError::out_of_range(Component::Month, month.into(), 1, 12)
    })?;
    let solar = Date::from_gregorian(year, month.into(), day.into()).ok_or_else(|| {
        ConversionError::out_of_range(Component::Day, day.into(), 1, month_len)
    })?;
    LunarDate::from_solar(solar)
}

/// 農曆年月日換算為公曆，見 [`LunarDate::from_lunar`]。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// let date = chinese::lunar_to_solar(2019, 6, 20, false).unwrap();
/// assert_eq!("2019-07-22", date.solar().iso_gregorian());
/// ```
pub fn lunar_to_solar(
    year: i32,
    month: u8,
    day: u8,
    is_leap: bool,
) -> Result<LunarDate, ConversionError> {
    LunarDate::from_lunar(year, month, day, is_leap)
}

/// 推移日期，見 [`LunarDate::advance`]。
pub fn advance(date: &LunarDate, field: Field, amount: i32) -> Result<LunarDate, ConversionError> {
    date.advance(field, amount)
}

fn day_from_offset(offset: i64, code: u32) -> Result<u8, ConversionError> {
    match u8::try_from(offset + 1) {
        Ok(day @ 1..=30) => Ok(day),
        _ => {
            debug!(code, offset, "day offset outside a lunar month");
            Err(ConversionError::InvalidDate { code })
        }
    }
}

fn solar_out_of_range(code: u32) -> ConversionError {
    debug!(code, "solar date outside lunar table");
    ConversionError::out_of_range(
        Component::SolarDate,
        code as i32,
        FIRST_SOLAR_DATE.code() as i32,
        LAST_SOLAR_DATE.code() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn solar_bounds() {
        assert_eq!("1900-01-31", FIRST_SOLAR_DATE.iso_gregorian());
        assert_eq!("2150-12-31", LAST_SOLAR_DATE.iso_gregorian());
    }

    #[test]
    fn dates() {
        use Month::*;
        let data = [
            ((1900, 1, 31), (1900, Common(1), 1)),
            ((2000, 1, 1), (1999, Common(11), 25)),
            ((2016, 11, 29), (2016, Common(11), 1)),
            ((2017, 1, 27), (2016, Common(12), 30)),
            ((2017, 1, 28), (2017, Common(1), 1)),
            ((2017, 7, 22), (2017, Common(6), 29)),
            ((2017, 7, 23), (2017, Leap(6), 1)),
            ((2017, 12, 17), (2017, Common(10), 30)),
            ((2019, 7, 22), (2019, Common(6), 20)),
            ((2020, 1, 1), (2019, Common(12), 7)),
            ((2020, 5, 23), (2020, Leap(4), 1)),
            ((2020, 6, 21), (2020, Common(5), 1)),
            ((2150, 12, 31), (2150, Common(11), 13)),
        ];
        for ((y, m, d), std) in data {
            let date = LunarDate::from_solar(solar(y, m, d)).unwrap();
            assert_eq!(
                std,
                (date.year(), date.lunar_month(), date.day()),
                "{y:04}-{m:02}-{d:02}"
            );
            assert_eq!(solar(y, m, d), date.solar());
        }
    }

    #[test]
    fn leap_eleventh_month_of_previous_year() {
        // 2128 年閏十一月，其月首在公曆 12 月，延續至次年 1 月
        let date = LunarDate::from_solar(solar(2129, 1, 10)).unwrap();
        assert_eq!(
            (2128, Month::Leap(11), 20),
            (date.year(), date.lunar_month(), date.day())
        );
        let date = LunarDate::from_solar(solar(2129, 1, 20)).unwrap();
        assert_eq!(
            (2128, Month::Common(12), 1),
            (date.year(), date.lunar_month(), date.day())
        );
    }

    #[test]
    fn before_first_month_start() {
        assert_eq!(
            Err(solar_out_of_range(19000130)),
            LunarDate::from_solar(solar(1900, 1, 30))
        );
    }

    #[test]
    fn from_lunar() {
        let date = LunarDate::from_lunar(2020, 4, 1, true).unwrap();
        assert_eq!(solar(2020, 5, 23), date.solar());
        assert!(date.is_leap_month());
        let date = LunarDate::from_lunar(2020, 4, 1, false).unwrap();
        assert_eq!(solar(2020, 4, 23), date.solar());
        let date = LunarDate::from_lunar(2020, 5, 1, false).unwrap();
        assert_eq!(solar(2020, 6, 21), date.solar());
        let date = LunarDate::from_lunar(2019, 12, 7, false).unwrap();
        assert_eq!(solar(2020, 1, 1), date.solar());
    }

    #[test]
    fn from_lunar_errors() {
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Year, 2151, 1900, 2150)),
            LunarDate::from_lunar(2151, 1, 1, false)
        );
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Month, 13, 1, 12)),
            LunarDate::from_lunar(2019, 13, 1, false)
        );
        assert_eq!(
            Err(ConversionError::NotLeapMonth {
                year: 2019,
                month: 6
            }),
            LunarDate::from_lunar(2019, 6, 1, true)
        );
        // 2020 年閏四月小，僅 29 日
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Day, 30, 1, 29)),
            LunarDate::from_lunar(2020, 4, 30, true)
        );
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Day, 0, 1, 29)),
            LunarDate::from_lunar(2020, 4, 0, true)
        );
    }

    #[test]
    fn last_month_of_table_is_cut_at_last_solar_date() {
        // 2150 年腊月初一為 2151-01-18，已超出可換算範圍
        assert_eq!(
            Err(solar_out_of_range(21510118)),
            LunarDate::from_lunar(2150, 12, 1, false)
        );
        let date = LunarDate::from_lunar(2150, 11, 13, false).unwrap();
        assert_eq!(LAST_SOLAR_DATE, date.solar());
    }

    #[test]
    fn solar_to_lunar_validates_input() {
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Month, 13, 1, 12)),
            solar_to_lunar(2019, 13, 1)
        );
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Day, 29, 1, 28)),
            solar_to_lunar(2019, 2, 29)
        );
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Year, 2151, 1900, 2150)),
            solar_to_lunar(2151, 1, 1)
        );
    }

    #[test]
    fn advance_fields() {
        let date = solar_to_lunar(2019, 7, 22).unwrap();
        for (field, amount, expected) in [
            (Field::Day, 1, solar(2019, 7, 23)),
            (Field::Day, -22, solar(2019, 6, 30)),
            (Field::Week, 2, solar(2019, 8, 5)),
            (Field::Month, 7, solar(2020, 2, 22)),
            (Field::Year, -1, solar(2018, 7, 22)),
        ] {
            let moved = date.advance(field, amount).unwrap();
            assert_eq!(expected, moved.solar(), "{field:?} {amount}");
            assert_eq!(moved, LunarDate::from_solar(expected).unwrap());
        }
    }

    #[test]
    fn advance_out_of_table() {
        let date = solar_to_lunar(2150, 12, 31).unwrap();
        assert_eq!(
            Err(ConversionError::out_of_range(Component::Year, 2151, 1900, 2150)),
            date.advance(Field::Day, 1)
        );
    }

    #[test]
    fn advance_by_huge_amounts() {
        let date = solar_to_lunar(2019, 7, 22).unwrap();
        let expected = Err(ConversionError::out_of_range(
            Component::SolarDate,
            20190722,
            19000131,
            21501231,
        ));
        for (field, amount) in [
            (Field::Month, i32::MAX),
            (Field::Month, i32::MIN),
            (Field::Year, 100_000_000),
            (Field::Year, i32::MAX),
            (Field::Week, i32::MAX),
        ] {
            assert_eq!(expected, date.advance(field, amount), "{field:?} {amount}");
        }
        // Representable as a `Date`, but far past the table.
        assert!(date.advance(Field::Month, 105_831_722).is_err());
    }

    #[test]
    fn lunar_names() {
        let date = solar_to_lunar(2020, 5, 23).unwrap();
        assert_eq!("闰四月初一", date.lunar_name(true));
        assert_eq!("四月初一", date.lunar_name(false));
        assert_eq!("二〇二〇年闰四月初一", date.to_string());
    }

    #[test]
    fn diff_between_lunar_dates() {
        let a = solar_to_lunar(2019, 7, 22).unwrap();
        let b = solar_to_lunar(2020, 7, 22).unwrap();
        assert_eq!(366, b.diff(&a, Unit::Day));
        assert_eq!(-1, a.diff(&b, Unit::Year));
    }

    #[test]
    fn month_name() {
        assert_eq!(Ok("冬月".to_owned()), Month::Common(11).name());
        assert_eq!(Ok("闰正月".to_owned()), Month::Leap(1).name());
        assert!(Month::Common(13).name().is_err());
    }
}
