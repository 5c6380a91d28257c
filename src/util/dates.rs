//! Calendar-day helpers over backend date strings.
//!
//! Backend dates arrive either as `YYYY-MM-DD` or as ISO timestamps; only the
//! leading calendar day is ever used.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DAY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const MONTH: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]");

/// Today's date in UTC.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parse the leading `YYYY-MM-DD` of a date or timestamp string.
#[must_use]
pub fn parse_day(raw: &str) -> Option<Date> {
    let head = raw.trim().get(..10)?;
    Date::parse(head, DAY).ok()
}

/// Parse a string that must be exactly `YYYY-MM-DD`.
#[must_use]
pub fn parse_exact_day(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 {
        return None;
    }
    parse_day(trimmed)
}

/// Format as `YYYY-MM-DD`.
#[must_use]
pub fn format_day(date: Date) -> String {
    // A Date carries every component these descriptions name.
    date.format(DAY).unwrap_or_default()
}

/// `YYYY-MM` bucket key for monthly series.
#[must_use]
pub fn month_key(date: Date) -> String {
    date.format(MONTH).unwrap_or_default()
}

#[cfg(test)]
#[path = "dates_test.rs"]
mod tests;
