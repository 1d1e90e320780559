use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;

use crate::parse;

/// Weeks in which an occurrence is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekMembership {
    All,
    Exact(BTreeSet<i32>),
}

impl Serialize for WeekMembership {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WeekMembership::All => serializer.serialize_str("all"),
            WeekMembership::Exact(weeks) => weeks.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CourseSource {
    Institutional,
    Custom { id: String },
}

/// One course occurrence as delivered by the institutional feed parser.
///
/// Field names follow the feed's camelCase keys. Everything except the
/// detailed week list is required; values are free text and are only
/// interpreted by [`CourseRecord::from_raw`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    #[serde(default)]
    pub day_label: String,
    pub class_time: String,
    pub course_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub class_week: String,
    pub max_class_time: String,
    #[serde(default)]
    pub class_week_details: Option<String>,
}

/// Canonical occurrence: which weekday, which slots, which weeks.
///
/// Built once and never mutated. A record without a weekday or without slots
/// is kept (it still shows up in listings) but never lands in a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Option<u8>,
    pub slots: BTreeSet<u8>,
    pub display_week_range: String,
    pub week_membership: WeekMembership,
    pub name: String,
    pub location: String,
    pub teacher: String,
    pub day_label: String,
    pub source: CourseSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn serialize_weekday<S: Serializer>(weekday: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(weekday.map(i32::from).unwrap_or(-1))
}

impl CourseRecord {
    pub fn from_raw(raw: &RawCourse) -> Self {
        Self {
            weekday: parse::parse_weekday(&raw.class_time),
            slots: parse::parse_slots(&raw.max_class_time),
            display_week_range: raw.class_week.clone(),
            week_membership: parse::parse_week_membership(raw.class_week_details.as_deref()),
            name: raw.course_name.clone(),
            location: raw.location.clone(),
            teacher: raw.teacher_name.clone(),
            day_label: raw.day_label.clone(),
            source: CourseSource::Institutional,
            note: None,
        }
    }

    pub fn is_in_week(&self, week: i32) -> bool {
        parse::is_in_week(&self.week_membership, week)
    }

    pub fn is_in_time_slot(&self, weekday: u8, slot: u8) -> bool {
        self.weekday == Some(weekday) && self.slots.contains(&slot)
    }

    pub fn first_week(&self) -> i32 {
        parse::first_week_of(&self.display_week_range)
    }
}
