use std::collections::BTreeSet;

use crate::course::WeekMembership;

/// Slot names used by the institutional feed, in period order.
pub const SLOT_NAMES: [&str; 5] = ["第一大节", "第二大节", "第三大节", "第四大节", "第五大节"];

pub const SLOT_COUNT: u8 = 5;
pub const WEEKDAY_COUNT: u8 = 7;

/// Weekday from the first character of a time descriptor such as `"3"` or
/// `"30102"`. Anything that is not a digit in 1..=7 yields `None`.
pub fn parse_weekday(time_descriptor: &str) -> Option<u8> {
    let c = time_descriptor.chars().next()?;
    let d = c.to_digit(10)? as u8;
    if (1..=WEEKDAY_COUNT).contains(&d) {
        Some(d)
    } else {
        None
    }
}

pub fn slot_ordinal(token: &str) -> Option<u8> {
    SLOT_NAMES
        .iter()
        .position(|name| *name == token)
        .map(|i| i as u8 + 1)
}

pub fn slot_name(slot: u8) -> Option<&'static str> {
    if slot == 0 {
        return None;
    }
    SLOT_NAMES.get(usize::from(slot) - 1).copied()
}

/// Comma-separated slot names -> slot ordinals. Unknown tokens contribute nothing.
pub fn parse_slots(slot_descriptor: &str) -> BTreeSet<u8> {
    slot_descriptor
        .split(',')
        .filter_map(|part| slot_ordinal(part.trim()))
        .collect()
}

/// Detailed week list such as `"1,2,3,5"`.
///
/// An empty (or blank) list means the course runs every week. Tokens that are
/// not integers are skipped, so a list made only of garbage produces an empty
/// exact set and the course never matches a specific week.
pub fn parse_week_membership(week_details: Option<&str>) -> WeekMembership {
    let text = week_details.unwrap_or("").trim();
    if text.is_empty() {
        return WeekMembership::All;
    }
    let weeks = text
        .split(',')
        .filter_map(|token| token.trim().parse::<i32>().ok())
        .collect();
    WeekMembership::Exact(weeks)
}

pub fn is_in_week(membership: &WeekMembership, week: i32) -> bool {
    match membership {
        WeekMembership::All => true,
        WeekMembership::Exact(weeks) => weeks.contains(&week),
    }
}

/// First week of a display range like `"3-16"`; defaults to 1.
pub fn first_week_of(display_week_range: &str) -> i32 {
    display_week_range
        .split('-')
        .next()
        .and_then(|first| first.trim().parse::<i32>().ok())
        .unwrap_or(1)
}
