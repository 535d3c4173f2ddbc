//! 格式化日期相關功能

use super::{LunarDate, Month};
use crate::error::{Component, ConversionError};

/// 年份數字，第 `0..=9` 項分別為「〇」到「九」。
pub const YEAR_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// 月名，第 `0..=11` 項分別為正月到腊月。
pub const MONTH_NAMES: [char; 12] = [
    '正', '二', '三', '四', '五', '六', '七', '八', '九', '十', '冬', '腊',
];

/// 日名，第 `0..=29` 項分別為初一到三十。二十、三十沿用「廿十」「卅十」的寫法。
pub const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "廿十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "卅十",
];

/// 十天干
pub const STEMS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// 十二地支
pub const BRANCHES: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

/// 十二生肖，與地支同序。
pub const ZODIAC: [char; 12] = [
    '鼠', '牛', '虎', '兔', '龙', '蛇', '马', '羊', '猴', '鸡', '狗', '猪',
];

/// 閏月標記
pub const LEAP_MARK: &str = "闰";

/// 逐位寫出四位年份。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!(Ok("二〇一九".to_owned()), chinese::fmt::year_name(2019));
/// assert!(chinese::fmt::year_name(10000).is_err());
/// ```
pub fn year_name(year: i32) -> Result<String, ConversionError> {
    if !(0..=9999).contains(&year) {
        return Err(ConversionError::out_of_range(Component::Year, year, 0, 9999));
    }
    Ok([1000, 100, 10, 1]
        .iter()
        .map(|place| YEAR_DIGITS[(year / place % 10) as usize])
        .collect())
}

/// 取得月名用字，`1` 為「正」，`12` 為「腊」。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!(Ok('冬'), chinese::fmt::month_name(11));
/// ```
pub fn month_name(month: u8) -> Result<char, ConversionError> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .ok_or_else(|| ConversionError::out_of_range(Component::Month, month.into(), 1, 12))
}

/// 取得日名，`1..=30` 分別為「初一」到「卅十」。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!(Ok("初十"), chinese::fmt::day_name(10));
/// assert_eq!(Ok("廿五"), chinese::fmt::day_name(25));
/// ```
pub fn day_name(day: u8) -> Result<&'static str, ConversionError> {
    usize::from(day)
        .checked_sub(1)
        .and_then(|i| DAY_NAMES.get(i))
        .copied()
        .ok_or_else(|| ConversionError::out_of_range(Component::Day, day.into(), 1, 30))
}

/// 取得月名（含「月」字），閏月前加「闰」。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{self, Month::*};
///
/// assert_eq!(Ok("冬月".to_owned()), chinese::fmt::month(Common(11)));
/// assert_eq!(Ok("闰正月".to_owned()), chinese::fmt::month(Leap(1)));
/// ```
pub fn month(m: Month) -> Result<String, ConversionError> {
    let leap = if m.is_leap() { LEAP_MARK } else { "" };
    Ok(format!("{leap}{}月", month_name(m.num())?))
}

/// 干支紀年，如「己亥年」。1900 年為庚子年，位於甲子起第 37 年。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!("庚子年", chinese::fmt::sexagenary_year_name(1900));
/// assert_eq!("己亥年", chinese::fmt::sexagenary_year_name(2019));
/// ```
pub fn sexagenary_year_name(year: i32) -> String {
    let n = year - super::MIN_YEAR + 36;
    format!(
        "{}{}年",
        STEMS[n.rem_euclid(10) as usize],
        BRANCHES[n.rem_euclid(12) as usize]
    )
}

/// 生肖，以公元 4 年（鼠年）起算。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!('猪', chinese::fmt::zodiac_name(2019));
/// ```
pub fn zodiac_name(year: i32) -> char {
    ZODIAC[(year - 4).rem_euclid(12) as usize]
}

/// 農曆全稱：年、月、日，後接干支紀年與生肖，以空格分隔。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// let date = chinese::solar_to_lunar(2019, 7, 22).unwrap();
/// assert_eq!("二〇一九年六月廿十 己亥年 猪", chinese::fmt::full_name(&date));
/// ```
pub fn full_name(date: &LunarDate) -> String {
    format!(
        "{date} {} {}",
        sexagenary_year_name(date.year()),
        zodiac_name(date.year())
    )
}
