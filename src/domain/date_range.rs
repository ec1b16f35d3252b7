//! Natural-language date ranges ("last week", "Q2 2024", ...).
//!
//! Pure: the caller supplies "today". Matching is a case-insensitive substring
//! search over an ordered phrase table; the first hit wins, so a phrase that
//! contains several keywords resolves by whichever appears earlier in the table.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Inclusive calendar range sent to the backend as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn start_iso(&self) -> String {
        iso_date(self.start)
    }

    pub fn end_iso(&self) -> String {
        iso_date(self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_iso(), self.end_iso())
    }
}

pub fn iso_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy)]
enum Phrase {
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    Quarter(u32),
    ThisYear,
    NextWeek,
    Tomorrow,
}

/// Order matters: first substring match wins.
const PHRASES: &[(&str, Phrase)] = &[
    ("today", Phrase::Today),
    ("yesterday", Phrase::Yesterday),
    ("last week", Phrase::LastWeek),
    ("last month", Phrase::LastMonth),
    ("q1", Phrase::Quarter(1)),
    ("q2", Phrase::Quarter(2)),
    ("q3", Phrase::Quarter(3)),
    ("q4", Phrase::Quarter(4)),
    ("this year", Phrase::ThisYear),
    ("next week", Phrase::NextWeek),
    ("tomorrow", Phrase::Tomorrow),
];

/// Years a quarter phrase may name explicitly. Anything else means "this year".
const QUARTER_YEARS: &[(&str, i32)] = &[("2023", 2023), ("2024", 2024), ("2025", 2025)];

/// Resolve `phrase` relative to `today`. `None` for missing, empty or
/// unrecognised phrases.
pub fn resolve(phrase: Option<&str>, today: NaiveDate) -> Option<DateRange> {
    let text = phrase?.to_lowercase();
    if text.is_empty() {
        return None;
    }

    let (_, kind) = PHRASES.iter().find(|(needle, _)| text.contains(needle))?;
    match *kind {
        Phrase::Today => Some(DateRange::single(today)),
        Phrase::Yesterday => today.checked_sub_days(Days::new(1)).map(DateRange::single),
        Phrase::LastWeek => Some(DateRange::new(today.checked_sub_days(Days::new(7))?, today)),
        Phrase::LastMonth => Some(DateRange::new(today.checked_sub_days(Days::new(30))?, today)),
        Phrase::Quarter(q) => {
            let year = QUARTER_YEARS
                .iter()
                .find(|(token, _)| text.contains(token))
                .map(|(_, year)| *year)
                .unwrap_or_else(|| today.year());
            quarter(year, q)
        }
        Phrase::ThisYear => Some(DateRange::new(
            NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
            NaiveDate::from_ymd_opt(today.year(), 12, 31)?,
        )),
        Phrase::NextWeek => Some(DateRange::new(today, today.checked_add_days(Days::new(7))?)),
        Phrase::Tomorrow => today.checked_add_days(Days::new(1)).map(DateRange::single),
    }
}

fn quarter(year: i32, q: u32) -> Option<DateRange> {
    let (start_month, end_month, end_day) = match q {
        1 => (1, 3, 31),
        2 => (4, 6, 30),
        3 => (7, 9, 30),
        4 => (10, 12, 31),
        _ => return None,
    };
    Some(DateRange::new(
        NaiveDate::from_ymd_opt(year, start_month, 1)?,
        NaiveDate::from_ymd_opt(year, end_month, end_day)?,
    ))
}
