//! User-authored courses and their expansion into per-weekday records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

use crate::course::{CourseRecord, CourseSource, WeekMembership};
use crate::merge::WeekBuckets;
use crate::parse::{SLOT_COUNT, WEEKDAY_COUNT};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomStoreError {
    #[error("course name must not be empty")]
    EmptyName,

    #[error("custom course not found: {id}")]
    NotFound { id: String },
}

impl CustomStoreError {
    pub fn code(&self) -> &'static str {
        match self {
            CustomStoreError::EmptyName => "bad_params",
            CustomStoreError::NotFound { .. } => "not_found",
        }
    }
}

/// Editable fields of a custom course, as sent by the management dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCourseInput {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub weekdays: Vec<u8>,
    #[serde(default)]
    pub slots: Vec<u8>,
    #[serde(default)]
    pub weeks: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCourseEntry {
    pub id: String,
    #[serde(flatten)]
    pub input: CustomCourseInput,
}

impl CustomCourseEntry {
    /// One record per listed weekday in 1..=7; other weekday values are
    /// skipped. An empty week list means the whole term.
    pub fn expand(&self, week_count: i32) -> Vec<CourseRecord> {
        let input = &self.input;
        let slots: BTreeSet<u8> = input
            .slots
            .iter()
            .copied()
            .filter(|s| (1..=SLOT_COUNT).contains(s))
            .collect();
        let display_week_range = week_range_label(&input.weeks, week_count);
        let week_membership = if input.weeks.is_empty() {
            WeekMembership::Exact((1..=week_count).collect())
        } else {
            WeekMembership::Exact(input.weeks.iter().copied().collect())
        };

        input
            .weekdays
            .iter()
            .copied()
            .filter(|d| (1..=WEEKDAY_COUNT).contains(d))
            .map(|weekday| CourseRecord {
                weekday: Some(weekday),
                slots: slots.clone(),
                display_week_range: display_week_range.clone(),
                week_membership: week_membership.clone(),
                name: input.name.clone(),
                location: input.location.clone(),
                teacher: input.teacher.clone(),
                day_label: weekday_label(weekday).to_string(),
                source: CourseSource::Custom {
                    id: self.id.clone(),
                },
                note: input.note.clone(),
            })
            .collect()
    }
}

fn week_range_label(weeks: &[i32], week_count: i32) -> String {
    match (weeks.iter().min(), weeks.iter().max()) {
        (Some(min), Some(max)) => format!("{min}-{max}"),
        _ => format!("1-{week_count}"),
    }
}

fn weekday_label(weekday: u8) -> &'static str {
    const LABELS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];
    LABELS
        .get(usize::from(weekday).wrapping_sub(1))
        .copied()
        .unwrap_or(LABELS[0])
}

/// In-memory list of custom courses, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CustomCourseStore {
    entries: Vec<CustomCourseEntry>,
}

impl CustomCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[CustomCourseEntry] {
        &self.entries
    }

    #[allow(dead_code)]
    pub fn get(&self, id: &str) -> Option<&CustomCourseEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn add(&mut self, input: CustomCourseInput) -> Result<String, CustomStoreError> {
        let input = validate(input)?;
        let id = Uuid::new_v4().to_string();
        self.entries.push(CustomCourseEntry {
            id: id.clone(),
            input,
        });
        Ok(id)
    }

    /// Replaces the fields of an existing entry; its position and id stay.
    pub fn update(&mut self, id: &str, input: CustomCourseInput) -> Result<(), CustomStoreError> {
        let input = validate(input)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CustomStoreError::NotFound { id: id.to_string() })?;
        entry.input = input;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<CustomCourseEntry, CustomStoreError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CustomStoreError::NotFound { id: id.to_string() })?;
        Ok(self.entries.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expands every entry into the weekday buckets, entry order preserved.
    pub fn to_buckets(&self, week_count: i32) -> WeekBuckets {
        let mut out = WeekBuckets::new();
        for entry in &self.entries {
            for record in entry.expand(week_count) {
                if let Some(weekday) = record.weekday {
                    out.push(weekday, record);
                }
            }
        }
        out
    }
}

fn validate(mut input: CustomCourseInput) -> Result<CustomCourseInput, CustomStoreError> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(CustomStoreError::EmptyName);
    }
    Ok(input)
}
