//! Term week arithmetic for the caller's week navigation.

use chrono::{Datelike, Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Monday of the week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Teaching week containing `today`, counted from the week of `term_start`
/// and clamped to `1..=week_count`.
pub fn current_week(term_start: NaiveDate, today: NaiveDate, week_count: i32) -> i32 {
    let days = (today - week_monday(term_start)).num_days();
    let week = if days < 0 { 1 } else { days / 7 + 1 };
    week.clamp(1, i64::from(week_count.max(1))) as i32
}

/// Monday..Sunday of teaching week `week` (1-based); `None` when the week
/// lies outside the representable calendar.
pub fn week_dates(term_start: NaiveDate, week: i32) -> Option<[NaiveDate; 7]> {
    let offset = Duration::try_weeks(i64::from(week) - 1)?;
    let monday = week_monday(term_start).checked_add_signed(offset)?;
    monday.checked_add_signed(Duration::days(6))?;
    Some(std::array::from_fn(|i| monday + Duration::days(i as i64)))
}

/// Header labels such as `3/4`.
pub fn week_date_labels(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().map(|d| d.format("%-m/%-d").to_string()).collect()
}
