//! Month view model for the calendar panel.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::date_key::CalendarDate;
use crate::error::{ShellError, ShellResult};
use crate::event_store::EventStore;
use crate::storage::KeyValueStore;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: CalendarDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub has_label: bool,
}

/// Whole weeks (Monday first) covering one month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first: NaiveDate,
    days: Vec<GridDay>,
}

impl MonthGrid {
    pub fn for_month<S: KeyValueStore>(
        year: i32,
        month: u32,
        today: CalendarDate,
        store: &EventStore<S>,
    ) -> ShellResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ShellError::InvalidDate(format!("{year}-{month:02}")))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| ShellError::InvalidDate(format!("{year}-{month:02}")))?;

        let lead = u64::from(first.weekday().num_days_from_monday());
        let trail = u64::from(6 - last.weekday().num_days_from_monday());

        let start = first
            .checked_sub_days(Days::new(lead))
            .ok_or_else(|| ShellError::InvalidDate(first.to_string()))?;
        let end = last
            .checked_add_days(Days::new(trail))
            .ok_or_else(|| ShellError::InvalidDate(last.to_string()))?;

        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| {
                let date = CalendarDate::from(d);
                GridDay {
                    date,
                    in_month: d.month() == month,
                    is_today: date == today,
                    has_label: store.has_label(date),
                }
            })
            .collect();

        Ok(MonthGrid { first, days })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Full month name and year, e.g. `October 2025`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn days(&self) -> &[GridDay] {
        &self.days
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridDay]> {
        self.days.chunks(7)
    }
}

/// `(year, month)` of the month after the given one.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// `(year, month)` of the month before the given one.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}
