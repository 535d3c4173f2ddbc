use nongli::chinese::{self, fmt};
use nongli::{Component, ConversionError};

#[test]
fn day_and_month_tables() {
    assert_eq!(Ok("初一"), fmt::day_name(1));
    assert_eq!(Ok("卅十"), fmt::day_name(30));
    assert_eq!(Ok('正'), fmt::month_name(1));
    assert_eq!(Ok('腊'), fmt::month_name(12));
}

#[test]
fn out_of_table_lookups() {
    assert_eq!(
        Err(ConversionError::OutOfRange {
            component: Component::Month,
            value: 13,
            min: 1,
            max: 12,
        }),
        fmt::month_name(13)
    );
    assert_eq!(
        Err(ConversionError::OutOfRange {
            component: Component::Day,
            value: 0,
            min: 1,
            max: 30,
        }),
        fmt::day_name(0)
    );
}

#[test]
fn full_names() {
    for ((y, m, d), std) in [
        ((2019, 7, 22), "二〇一九年六月廿十 己亥年 猪"),
        ((2017, 7, 23), "二〇一七年闰六月初一 丁酉年 鸡"),
        ((2000, 1, 1), "一九九九年冬月廿五 己卯年 兔"),
        ((1900, 1, 31), "一九〇〇年正月初一 庚子年 鼠"),
        ((2020, 1, 24), "二〇一九年腊月卅十 己亥年 猪"),
    ] {
        let date = chinese::solar_to_lunar(y, m, d).unwrap();
        assert_eq!(std, date.full_name(), "{y:04}-{m:02}-{d:02}");
        assert_eq!(std, fmt::full_name(&date));
    }
}

#[test]
fn lunar_names_without_year() {
    let date = chinese::solar_to_lunar(2017, 7, 23).unwrap();
    assert_eq!("闰六月初一", date.lunar_name(true));
    assert_eq!("六月初一", date.lunar_name(false));
    assert_eq!(Ok("闰六月".to_owned()), date.lunar_month().name());
}
