//! Field-level checks shared by the event and user payloads.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Event images travel as data URIs inside the row.
pub const MAX_IMAGE_URL_LEN: usize = 200_000;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
/// Titles, names and e-mails live in `VARCHAR(255)` columns.
pub const MAX_SHORT_TEXT_CHARS: usize = 255;

lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref TIME_REGEX: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Parses a `YYYY-MM-DD` calendar date. Impossible dates such as
/// `2024-02-30` are rejected rather than rolled over.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    if !DATE_REGEX.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses an `HH:MM` wall-clock time, 00:00 through 23:59.
pub fn parse_event_time(value: &str) -> Option<NaiveTime> {
    if !TIME_REGEX.is_match(value) {
        return None;
    }
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn fits_short_text(value: &str) -> bool {
    value.chars().count() <= MAX_SHORT_TEXT_CHARS
}

/// Trims the value and drops it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
