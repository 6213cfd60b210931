use super::{format_gregorian, format_jalali};
use crate::calendar::{JalaliDate, Locale};
use chrono::NaiveDate;

fn sample() -> JalaliDate {
    // Monday, 2026-10-19
    JalaliDate::new(1405, 7, 27).unwrap()
}

#[test]
fn test_default_label_english() {
    let label = format_jalali(&sample(), "%A, %d %B %Y", Locale::English);
    assert_eq!(label, "Doshanbeh, 27 Mehr 1405");
}

#[test]
fn test_default_label_persian() {
    let label = format_jalali(&sample(), "%A, %d %B %Y", Locale::Persian);
    assert_eq!(label, "دوشنبه, ۲۷ مهر ۱۴۰۵");
}

#[test]
fn test_zero_padding_and_unpadded_day() {
    let date = JalaliDate::new(1405, 1, 5).unwrap();
    assert_eq!(format_jalali(&date, "%d/%m", Locale::English), "05/01");
    assert_eq!(format_jalali(&date, "%-d/%-m", Locale::English), "5/1");
}

#[test]
fn test_abbreviations_and_ordinal() {
    let date = JalaliDate::new(1405, 1, 5).unwrap();
    assert_eq!(
        format_jalali(&date, "%a %b %j %y", Locale::English),
        "Cha Far 005 05"
    );
}

#[test]
fn test_ordinal_in_thirty_day_months() {
    // Last day of the first half-year
    let shahrivar_end = JalaliDate::new(1405, 6, 31).unwrap();
    assert_eq!(format_jalali(&shahrivar_end, "%j", Locale::English), "186");

    assert_eq!(format_jalali(&sample(), "%j", Locale::English), "213");

    // 1403 is leap, so Esfand has 30 days
    let leap_end = JalaliDate::new(1403, 12, 30).unwrap();
    assert_eq!(format_jalali(&leap_end, "%j", Locale::English), "366");

    let common_end = JalaliDate::new(1404, 12, 29).unwrap();
    assert_eq!(format_jalali(&common_end, "%-j", Locale::English), "365");
}

#[test]
fn test_literal_percent_and_unknown_directive() {
    assert_eq!(format_jalali(&sample(), "100%% %Q", Locale::English), "100% %Q");
    assert_eq!(format_jalali(&sample(), "trailing %", Locale::English), "trailing %");
}

#[test]
fn test_gregorian_label() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(
        format_gregorian(date, Locale::English),
        "Gregorian: 2026-10-19"
    );
    assert_eq!(format_gregorian(date, Locale::Persian), "میلادی: ۲۰۲۶-۱۰-۱۹");
}
