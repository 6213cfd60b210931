use super::{is_leap_year, month_length, JalaliDate, Weekday};
use chrono::NaiveDate;

fn gregorian(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assert_converts(g: NaiveDate, year: i32, month: u32, day: u32) {
    let j = JalaliDate::from_gregorian(g).unwrap();
    assert_eq!(
        (j.year(), j.month(), j.day()),
        (year, month, day),
        "converting {g}"
    );
}

#[test]
fn test_nowruz_1403() {
    assert_converts(gregorian(2024, 3, 20), 1403, 1, 1);
}

#[test]
fn test_last_day_of_leap_year() {
    assert_converts(gregorian(2025, 3, 20), 1403, 12, 30);
    assert_converts(gregorian(2025, 3, 21), 1404, 1, 1);
}

#[test]
fn test_last_day_of_common_year() {
    assert_converts(gregorian(2023, 3, 20), 1401, 12, 29);
    assert_converts(gregorian(2023, 3, 21), 1402, 1, 1);
}

#[test]
fn test_historical_dates() {
    assert_converts(gregorian(1979, 2, 11), 1357, 11, 22);
    assert_converts(gregorian(2000, 1, 1), 1378, 10, 11);
}

#[test]
fn test_second_half_of_year() {
    assert_converts(gregorian(2026, 9, 22), 1405, 6, 31);
    assert_converts(gregorian(2026, 9, 23), 1405, 7, 1);
    assert_converts(gregorian(2026, 10, 19), 1405, 7, 27);
}

#[test]
fn test_weekday_follows_gregorian_date() {
    let j = JalaliDate::from_gregorian(gregorian(2026, 10, 19)).unwrap();
    assert_eq!(j.weekday(), Weekday::Monday);

    let j = JalaliDate::from_gregorian(gregorian(2021, 3, 20)).unwrap();
    assert_eq!(j.weekday(), Weekday::Saturday);
    assert_eq!(j.weekday().index(), 0);
}

#[test]
fn test_leap_years() {
    for year in [1395, 1399, 1403, 1408] {
        assert!(is_leap_year(year).unwrap(), "{year} should be leap");
    }
    for year in [1400, 1401, 1402, 1404, 1405] {
        assert!(!is_leap_year(year).unwrap(), "{year} should not be leap");
    }
}

#[test]
fn test_month_lengths() {
    assert_eq!(month_length(1405, 1).unwrap(), 31);
    assert_eq!(month_length(1405, 6).unwrap(), 31);
    assert_eq!(month_length(1405, 7).unwrap(), 30);
    assert_eq!(month_length(1405, 12).unwrap(), 29);
    assert_eq!(month_length(1403, 12).unwrap(), 30);
    assert!(month_length(1405, 13).is_err());
    assert!(month_length(1405, 0).is_err());
}

#[test]
fn test_round_trip_across_several_years() {
    let mut date = gregorian(2019, 1, 1);
    let end = gregorian(2031, 1, 1);
    while date < end {
        let j = JalaliDate::from_gregorian(date).unwrap();
        assert_eq!(j.to_gregorian().unwrap(), date, "round trip of {date}");
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_consecutive_days_are_consecutive() {
    let mut previous = JalaliDate::from_gregorian(gregorian(2024, 3, 19)).unwrap();
    let mut date = gregorian(2024, 3, 20);
    for _ in 0..400 {
        let current = JalaliDate::from_gregorian(date).unwrap();
        if current.day() == 1 {
            assert_eq!(
                previous.day(),
                month_length(previous.year(), previous.month()).unwrap()
            );
        } else {
            assert_eq!(current.day(), previous.day() + 1);
        }
        previous = current;
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_new_validates_day() {
    assert!(JalaliDate::new(1405, 12, 29).is_ok());
    assert!(JalaliDate::new(1405, 12, 30).is_err());
    assert!(JalaliDate::new(1403, 12, 30).is_ok());
    assert!(JalaliDate::new(1405, 1, 0).is_err());
}

#[test]
fn test_new_computes_weekday() {
    let j = JalaliDate::new(1404, 1, 1).unwrap();
    assert_eq!(j.weekday(), Weekday::Friday);
    assert_eq!(j.to_gregorian().unwrap(), gregorian(2025, 3, 21));
}

#[test]
fn test_ordinal() {
    assert_eq!(JalaliDate::new(1405, 1, 1).unwrap().ordinal(), 1);
    assert_eq!(JalaliDate::new(1405, 7, 1).unwrap().ordinal(), 187);
    assert_eq!(JalaliDate::new(1403, 12, 30).unwrap().ordinal(), 366);
}

#[test]
fn test_out_of_range_year() {
    assert!(JalaliDate::new(3200, 1, 1).is_err());
}

#[test]
fn test_display() {
    let j = JalaliDate::new(1405, 7, 5).unwrap();
    assert_eq!(j.to_string(), "1405/07/05");
}
