//! Gregorian ⇄ Jalali conversion.
//!
//! Leap years follow the 2820-year cycle approximated by the break table of
//! Borkowski's algorithm, valid for Jalali years -61 through 3177. Gregorian
//! day arithmetic is delegated to `chrono`.

use crate::error::{IndicatorError, Result};
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Jalali years at which the 33-year leap sub-cycle is re-anchored.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Day of the week, starting from Saturday as the Persian week does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// Zero-based position in the Persian week (Saturday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
    weekday: Weekday,
}

struct YearInfo {
    /// 0 for a leap year, otherwise years elapsed since the last one.
    leap: i32,
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls.
    march: u32,
}

fn year_info(jy: i32) -> Result<YearInfo> {
    let first = BREAKS[0];
    let last = BREAKS[BREAKS.len() - 1];
    if jy < first || jy >= last {
        return Err(IndicatorError::Calendar(format!(
            "Jalali year {jy} is outside the supported range {first}..{last}"
        )));
    }

    let gregorian_year = jy + 621;
    let mut leap_j = -14;
    let mut jp = first;
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(YearInfo {
        leap,
        gregorian_year,
        march: march as u32,
    })
}

fn farvardin_first(info: &YearInfo) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march).ok_or_else(|| {
        IndicatorError::Calendar(format!(
            "Invalid start of year: {}-03-{}",
            info.gregorian_year, info.march
        ))
    })
}

/// Whether `year` has 366 days.
pub fn is_leap_year(year: i32) -> Result<bool> {
    Ok(year_info(year)?.leap == 0)
}

/// Number of days in `month` of `year`.
pub fn month_length(year: i32, month: u32) -> Result<u32> {
    match month {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 if is_leap_year(year)? => Ok(30),
        12 => Ok(29),
        _ => Err(IndicatorError::Calendar(format!("Invalid month: {month}"))),
    }
}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if day == 0 || day > month_length(year, month)? {
            return Err(IndicatorError::Calendar(format!(
                "Invalid Jalali date: {year}/{month}/{day}"
            )));
        }
        let gregorian = to_gregorian_unchecked(year, month, day)?;
        Ok(JalaliDate {
            year,
            month,
            day,
            weekday: Weekday::from_chrono(gregorian.weekday()),
        })
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self> {
        let mut year = date.year() - 621;
        let info = year_info(year)?;
        let start = farvardin_first(&info)?;
        let mut k = (date - start).num_days() as i32;

        let (month, day) = if (0..=185).contains(&k) {
            (1 + k / 31, k % 31 + 1)
        } else {
            if k >= 0 {
                k -= 186;
            } else {
                // Still in the previous Jalali year, counting from Mehr 1
                year -= 1;
                k += 179;
                if info.leap == 1 {
                    k += 1;
                }
            }
            (7 + k / 30, k % 30 + 1)
        };

        Ok(JalaliDate {
            year,
            month: month as u32,
            day: day as u32,
            weekday: Weekday::from_chrono(date.weekday()),
        })
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate> {
        to_gregorian_unchecked(self.year, self.month, self.day)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// One-based day of the year.
    pub fn ordinal(&self) -> u32 {
        let before = if self.month <= 7 {
            (self.month - 1) * 31
        } else {
            186 + (self.month - 7) * 30
        };
        before + self.day
    }
}

fn to_gregorian_unchecked(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    let info = year_info(year)?;
    let start = farvardin_first(&info)?;
    let offset = (month - 1) * 31 - (month / 7) * (month.max(7) - 7) + day - 1;
    start
        .checked_add_days(Days::new(u64::from(offset)))
        .ok_or_else(|| IndicatorError::Calendar(format!("Date out of range: {year}/{month}/{day}")))
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
#[path = "jalali_test.rs"]
mod jalali_test;
