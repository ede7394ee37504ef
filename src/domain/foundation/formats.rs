//! Wire-format checks shared by the input validators.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").expect("time pattern is valid"));

/// Outcome of checking a `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Valid(NaiveDate),
    /// Not shaped like `YYYY-MM-DD`.
    BadFormat,
    /// Shaped correctly but not a calendar date (e.g. `2024-02-30`).
    NotACalendarDate,
}

pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL_PATTERN.is_match(value)
}

pub fn check_date(value: &str) -> DateCheck {
    if !DATE_PATTERN.is_match(value) {
        return DateCheck::BadFormat;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => DateCheck::Valid(date),
        Err(_) => DateCheck::NotACalendarDate,
    }
}

/// Parses `YYYY-MM-DD`, returning `None` for anything else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    match check_date(value) {
        DateCheck::Valid(date) => Some(date),
        _ => None,
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if !TIME_PATTERN.is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Trims a raw optional field, treating blank strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_emails() {
        assert!(is_valid_email("juan.delacruz@example.com"));
        assert!(is_valid_email("a+tag@sub.school.edu.ph"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn date_check_distinguishes_format_from_calendar() {
        assert_eq!(check_date("2024/01/05"), DateCheck::BadFormat);
        assert_eq!(check_date("2024-1-5"), DateCheck::BadFormat);
        assert_eq!(check_date("2023-02-29"), DateCheck::NotACalendarDate);
        assert_eq!(
            check_date("2024-02-29"),
            DateCheck::Valid(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn time_accepts_with_and_without_seconds() {
        assert_eq!(parse_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_time("17:05:10"), NaiveTime::from_hms_opt(17, 5, 10));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("9am"), None);
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
