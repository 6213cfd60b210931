//! strftime-style formatting of Jalali dates.
//!
//! Supported directives: `%A %a %B %b %d %-d %m %-m %Y %y %j %%`. Anything
//! else is copied through unchanged. Numbers are rendered with the locale's
//! digits.

use super::{JalaliDate, Locale};
use crate::config::constants::formats;
use chrono::NaiveDate;

pub fn format_jalali(date: &JalaliDate, pattern: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let unpadded = chars.peek() == Some(&'-');
        if unpadded {
            chars.next();
        }

        let Some(directive) = chars.next() else {
            out.push('%');
            break;
        };

        let number = |value: u32, width: usize| {
            let text = if unpadded {
                value.to_string()
            } else {
                format!("{value:0width$}")
            };
            locale.localize_digits(&text)
        };

        match directive {
            'A' => out.push_str(locale.weekday_name(date.weekday())),
            'a' => out.push_str(locale.weekday_abbr(date.weekday())),
            'B' => out.push_str(locale.month_name(date.month())),
            'b' => out.push_str(locale.month_abbr(date.month())),
            'd' => out.push_str(&number(date.day(), 2)),
            'm' => out.push_str(&number(date.month(), 2)),
            'j' => out.push_str(&number(date.ordinal(), 3)),
            'Y' => out.push_str(&locale.localize_digits(&date.year().to_string())),
            'y' => out.push_str(&number(date.year().rem_euclid(100) as u32, 2)),
            '%' => out.push('%'),
            other => {
                out.push('%');
                if unpadded {
                    out.push('-');
                }
                out.push(other);
            }
        }
    }

    out
}

/// The reference Gregorian line shown under the Persian date.
pub fn format_gregorian(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::English => date.format(formats::GREGORIAN).to_string(),
        Locale::Persian => {
            let iso = date.format("%Y-%m-%d").to_string();
            format!("میلادی: {}", locale.localize_digits(&iso))
        }
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
