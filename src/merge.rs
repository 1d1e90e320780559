use serde::Serialize;

use crate::course::CourseRecord;
use crate::parse::WEEKDAY_COUNT;

const BUCKETS: usize = WEEKDAY_COUNT as usize;

/// Seven ordered per-weekday lists; index 0 holds weekday 1.
///
/// A record normally sits in the bucket of its own weekday, but nothing
/// enforces that: a record placed in a foreign bucket is carried along and
/// simply never matches a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekBuckets {
    days: [Vec<CourseRecord>; BUCKETS],
}

impl WeekBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds buckets from lists given in weekday order. Missing trailing
    /// days are empty; extra lists past the seventh are ignored by the caller
    /// contract and rejected at the IPC boundary.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Vec<CourseRecord>>,
    {
        let mut out = Self::new();
        for (slot, records) in out.days.iter_mut().zip(days) {
            *slot = records;
        }
        out
    }

    /// Weekday 1..=7; anything else returns an empty slice.
    pub fn day(&self, weekday: u8) -> &[CourseRecord] {
        match weekday_index(weekday) {
            Some(i) => &self.days[i],
            None => &[],
        }
    }

    pub fn push(&mut self, weekday: u8, record: CourseRecord) -> bool {
        match weekday_index(weekday) {
            Some(i) => {
                self.days[i].push(record);
                true
            }
            None => false,
        }
    }

    /// `(weekday, bucket)` pairs in weekday order.
    pub fn iter_days(&self) -> impl Iterator<Item = (u8, &[CourseRecord])> {
        self.days
            .iter()
            .enumerate()
            .map(|(i, records)| (i as u8 + 1, records.as_slice()))
    }

    /// All records in merge order: weekday by weekday, bucket order within.
    #[allow(dead_code)]
    pub fn records(&self) -> impl Iterator<Item = &CourseRecord> {
        self.days.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}

fn weekday_index(weekday: u8) -> Option<usize> {
    if (1..=WEEKDAY_COUNT).contains(&weekday) {
        Some(usize::from(weekday) - 1)
    } else {
        None
    }
}

/// Groups a flat record list into weekday buckets, dropping records whose
/// weekday could not be parsed.
pub fn group_by_weekday<I>(records: I) -> WeekBuckets
where
    I: IntoIterator<Item = CourseRecord>,
{
    let mut out = WeekBuckets::new();
    for record in records {
        if let Some(weekday) = record.weekday {
            out.push(weekday, record);
        }
    }
    out
}

/// Bucket `i` of the result is institutional bucket `i` followed by custom
/// bucket `i`. No sorting and no dedup: repeated courses surface later as
/// cell overlaps.
pub fn merge_sources(institutional: &WeekBuckets, custom: &WeekBuckets) -> WeekBuckets {
    let mut out = institutional.clone();
    for (day, extra) in out.days.iter_mut().zip(custom.days.iter()) {
        day.extend(extra.iter().cloned());
    }
    out
}
