//! Calendar dates keyed by their canonical `YYYY-MM-DD` string.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::ShellError;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A day in the local calendar, without time of day.
///
/// The canonical key sorts lexicographically in chronological order, which
/// the event store relies on for its "soonest future date" lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    /// Parse a canonical `YYYY-MM-DD` key.
    pub fn parse_key(key: &str) -> Option<Self> {
        // Reject non-padded forms like "2025-3-1" so parsed dates always
        // round-trip to the same key.
        if key.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(key, KEY_FORMAT)
            .ok()
            .map(CalendarDate)
    }

    pub fn key(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }

    /// The following day. Saturates at the last representable date.
    pub fn next_day(&self) -> Self {
        CalendarDate(self.0.checked_add_days(Days::new(1)).unwrap_or(self.0))
    }

    /// Day number and abbreviated month, e.g. `23-Oct`.
    pub fn short_label(&self) -> String {
        self.0.format("%-d-%b").to_string()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl FromStr for CalendarDate {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarDate::parse_key(s.trim()).ok_or_else(|| ShellError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn key_is_zero_padded() {
        assert_eq!(date(2025, 3, 7).key(), "2025-03-07");
    }

    #[test]
    fn parse_key_rejects_unpadded_and_garbage() {
        assert_eq!(CalendarDate::parse_key("2025-03-07"), Some(date(2025, 3, 7)));
        assert_eq!(CalendarDate::parse_key("2025-3-7"), None);
        assert_eq!(CalendarDate::parse_key("2025-02-30"), None);
        assert_eq!(CalendarDate::parse_key("tomorrow"), None);
    }

    #[test]
    fn next_day_rolls_over_month_and_year() {
        assert_eq!(date(2024, 2, 28).next_day(), date(2024, 2, 29));
        assert_eq!(date(2025, 2, 28).next_day(), date(2025, 3, 1));
        assert_eq!(date(2025, 12, 31).next_day(), date(2026, 1, 1));
    }

    #[test]
    fn short_label_uses_day_and_abbreviated_month() {
        assert_eq!(date(2025, 10, 23).short_label(), "23-Oct");
        assert_eq!(date(2026, 1, 5).short_label(), "5-Jan");
    }

    #[test]
    fn key_order_matches_date_order() {
        let a = date(2025, 9, 30);
        let b = date(2025, 10, 1);
        assert!(a < b);
        assert!(a.key() < b.key());
    }

    #[test]
    fn from_str_reports_invalid_input() {
        assert_eq!(" 2025-10-01 ".parse::<CalendarDate>().unwrap(), date(2025, 10, 1));
        assert!(matches!(
            "next week".parse::<CalendarDate>(),
            Err(ShellError::InvalidDate(_))
        ));
    }
}
