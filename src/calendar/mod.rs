//! Persian calendar support: conversion, localized names and label formatting.

pub mod clock;
pub mod format;
pub mod jalali;

pub use clock::{Clock, FixedClock, SystemClock};
pub use format::{format_gregorian, format_jalali};
pub use jalali::{JalaliDate, Weekday};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Latin transliteration of Persian names with ASCII digits
    #[default]
    English,
    /// Persian script with Persian digits
    Persian,
}

const WEEKDAYS_EN: [&str; 7] = [
    "Shanbeh",
    "Yekshanbeh",
    "Doshanbeh",
    "Seshanbeh",
    "Chaharshanbeh",
    "Panjshanbeh",
    "Jomeh",
];

const WEEKDAYS_EN_ABB: [&str; 7] = ["Sha", "Yek", "Dos", "Ses", "Cha", "Pan", "Jom"];

const WEEKDAYS_FA: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

const WEEKDAYS_FA_ABB: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

const MONTHS_EN: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

const MONTHS_EN_ABB: [&str; 12] = [
    "Far", "Ord", "Kho", "Tir", "Mor", "Sha", "Meh", "Aba", "Aza", "Dey", "Bah", "Esf",
];

const MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

impl Locale {
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        match self {
            Locale::English => WEEKDAYS_EN[weekday.index()],
            Locale::Persian => WEEKDAYS_FA[weekday.index()],
        }
    }

    pub fn weekday_abbr(self, weekday: Weekday) -> &'static str {
        match self {
            Locale::English => WEEKDAYS_EN_ABB[weekday.index()],
            Locale::Persian => WEEKDAYS_FA_ABB[weekday.index()],
        }
    }

    /// Name of `month` (1–12); out-of-range months yield an empty string.
    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Locale::English => &MONTHS_EN,
            Locale::Persian => &MONTHS_FA,
        };
        month
            .checked_sub(1)
            .and_then(|i| names.get(i as usize))
            .copied()
            .unwrap_or("")
    }

    pub fn month_abbr(self, month: u32) -> &'static str {
        match self {
            Locale::English => month
                .checked_sub(1)
                .and_then(|i| MONTHS_EN_ABB.get(i as usize))
                .copied()
                .unwrap_or(""),
            // Persian month names are not abbreviated
            Locale::Persian => self.month_name(month),
        }
    }

    /// Replace ASCII digits with the locale's digits.
    pub fn localize_digits(self, text: &str) -> String {
        match self {
            Locale::English => text.to_string(),
            Locale::Persian => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => PERSIAN_DIGITS[d as usize],
                    None => c,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "english"),
            Locale::Persian => write!(f, "persian"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "fa" | "persian" | "farsi" => Ok(Locale::Persian),
            other => Err(format!("Unknown locale: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::English));
        assert_eq!("Persian".parse::<Locale>(), Ok(Locale::Persian));
        assert_eq!(" fa ".parse::<Locale>(), Ok(Locale::Persian));
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_display_round_trips() {
        for locale in [Locale::English, Locale::Persian] {
            assert_eq!(locale.to_string().parse::<Locale>(), Ok(locale));
        }
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Locale::English.month_name(1), "Farvardin");
        assert_eq!(Locale::English.month_name(12), "Esfand");
        assert_eq!(Locale::Persian.month_name(7), "مهر");
        assert_eq!(Locale::English.month_name(0), "");
        assert_eq!(Locale::English.month_name(13), "");
    }

    #[test]
    fn test_weekday_names_start_on_saturday() {
        assert_eq!(Locale::English.weekday_name(Weekday::Saturday), "Shanbeh");
        assert_eq!(Locale::English.weekday_name(Weekday::Friday), "Jomeh");
        assert_eq!(Locale::Persian.weekday_name(Weekday::Friday), "جمعه");
    }

    #[test]
    fn test_localize_digits() {
        assert_eq!(Locale::Persian.localize_digits("1405/07/27"), "۱۴۰۵/۰۷/۲۷");
        assert_eq!(Locale::English.localize_digits("1405"), "1405");
    }
}
