//! Adjacency-aware greedy color assignment for course names.
//!
//! Each course name gets one palette index. Names that already own a color
//! keep it; new names are placed one at a time, most widespread first, on the
//! color that touches the fewest same-colored neighbors in the grid.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::merge::WeekBuckets;
use crate::parse::SLOT_COUNT;

const CONFLICT_WEIGHT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub weekday: u8,
    pub slot: u8,
}

impl Position {
    /// Same slot on neighboring (or the same) weekday, or same weekday in a
    /// neighboring (or the same) slot. Diagonals are not adjacent.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        (self.slot == other.slot && self.weekday.abs_diff(other.weekday) <= 1)
            || (self.weekday == other.weekday && self.slot.abs_diff(other.slot) <= 1)
    }
}

/// Every grid position a course name can occupy in any week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFootprint {
    pub name: String,
    pub positions: BTreeSet<Position>,
}

/// Footprints of all names in `merged`, in order of first appearance.
///
/// Week membership is ignored. A record only contributes positions from the
/// bucket of its own weekday, but its name is listed either way.
pub fn footprints(merged: &WeekBuckets) -> Vec<CourseFootprint> {
    let mut order: Vec<CourseFootprint> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (weekday, records) in merged.iter_days() {
        for record in records {
            let i = *index.entry(record.name.clone()).or_insert_with(|| {
                order.push(CourseFootprint {
                    name: record.name.clone(),
                    positions: BTreeSet::new(),
                });
                order.len() - 1
            });
            for slot in 1..=SLOT_COUNT {
                if record.is_in_time_slot(weekday, slot) {
                    order[i].positions.insert(Position { weekday, slot });
                }
            }
        }
    }
    order
}

/// Course name -> palette index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorAssignment {
    colors: BTreeMap<String, usize>,
}

impl ColorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.colors.get(name).copied()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Colors every name in `footprints` that has no color yet and returns
    /// the newly colored names in assignment order.
    pub fn extend_with(&mut self, footprints: &[CourseFootprint], palette_len: usize) -> Vec<String> {
        if palette_len == 0 {
            return Vec::new();
        }
        let by_name: HashMap<&str, &CourseFootprint> =
            footprints.iter().map(|f| (f.name.as_str(), f)).collect();

        let mut pending: Vec<&CourseFootprint> = footprints
            .iter()
            .filter(|f| !self.colors.contains_key(&f.name))
            .collect();
        // stable: equal counts keep first-appearance order
        pending.sort_by(|a, b| b.positions.len().cmp(&a.positions.len()));

        let mut added = Vec::with_capacity(pending.len());
        for course in pending {
            let color = self.select_color(course, &by_name, palette_len);
            debug!(course = %course.name, color, positions = course.positions.len(), "assigned course color");
            self.colors.insert(course.name.clone(), color);
            added.push(course.name.clone());
        }
        added
    }

    fn select_color(
        &self,
        course: &CourseFootprint,
        by_name: &HashMap<&str, &CourseFootprint>,
        palette_len: usize,
    ) -> usize {
        let mut conflict = vec![0usize; palette_len];
        let mut usage = vec![0usize; palette_len];

        for (name, &color) in &self.colors {
            if color >= palette_len {
                continue;
            }
            usage[color] += 1;
            let Some(other) = by_name.get(name.as_str()) else {
                continue;
            };
            for mine in &course.positions {
                for theirs in &other.positions {
                    if mine.is_adjacent(theirs) {
                        conflict[color] += 1;
                    }
                }
            }
        }

        let mut best = 0usize;
        let mut best_score = usize::MAX;
        for c in 0..palette_len {
            let score = conflict[c] * CONFLICT_WEIGHT + usage[c];
            if score < best_score {
                best_score = score;
                best = c;
            }
        }
        best
    }
}

/// Returns `existing` extended with colors for every uncolored name.
#[allow(dead_code)]
pub fn assign_colors(
    existing: &ColorAssignment,
    footprints: &[CourseFootprint],
    palette_len: usize,
) -> ColorAssignment {
    let mut out = existing.clone();
    out.extend_with(footprints, palette_len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseRecord, RawCourse};
    use crate::merge::group_by_weekday;
    use crate::parse::slot_name;
    use proptest::prelude::*;

    fn pos(weekday: u8, slot: u8) -> Position {
        Position { weekday, slot }
    }

    fn footprint(name: &str, cells: &[(u8, u8)]) -> CourseFootprint {
        CourseFootprint {
            name: name.to_string(),
            positions: cells.iter().map(|&(d, s)| pos(d, s)).collect(),
        }
    }

    fn record(name: &str, weekday: u8, slots: &[u8]) -> CourseRecord {
        let names: Vec<&str> = slots.iter().filter_map(|s| slot_name(*s)).collect();
        CourseRecord::from_raw(&RawCourse {
            class_time: weekday.to_string(),
            course_name: name.to_string(),
            class_week: "1-16".to_string(),
            max_class_time: names.join(","),
            class_week_details: Some("1,2".to_string()),
            ..RawCourse::default()
        })
    }

    #[test]
    fn adjacency_is_row_and_column_only() {
        assert!(pos(2, 3).is_adjacent(&pos(2, 3)));
        assert!(pos(2, 3).is_adjacent(&pos(3, 3)));
        assert!(pos(2, 3).is_adjacent(&pos(1, 3)));
        assert!(pos(2, 3).is_adjacent(&pos(2, 4)));
        assert!(pos(2, 3).is_adjacent(&pos(2, 2)));
        assert!(!pos(2, 3).is_adjacent(&pos(3, 4)));
        assert!(!pos(2, 3).is_adjacent(&pos(4, 3)));
        assert!(!pos(2, 3).is_adjacent(&pos(2, 5)));
    }

    #[test]
    fn footprints_ignore_week_membership_and_keep_first_appearance() {
        let merged = group_by_weekday(vec![
            record("b", 1, &[1, 2]),
            record("a", 1, &[3]),
            record("b", 3, &[1]),
            record("c", 2, &[]),
        ]);
        let fps = footprints(&merged);
        let names: Vec<&str> = fps.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(fps[0].positions.len(), 3);
        assert!(fps[2].positions.is_empty());
    }

    #[test]
    fn row_of_seven_gets_distinct_neighbor_colors() {
        let fps: Vec<CourseFootprint> = (1..=7u8)
            .map(|d| footprint(&format!("course-{d}"), &[(d, 1)]))
            .collect();
        let colors = assign_colors(&ColorAssignment::new(), &fps, 7);
        for d in 1..7u8 {
            let left = colors.get(&format!("course-{d}")).expect("left");
            let right = colors.get(&format!("course-{}", d + 1)).expect("right");
            assert_ne!(left, right, "weekday {d} and {} share a color", d + 1);
        }
        let distinct: BTreeSet<usize> = colors.iter().map(|(_, c)| c).collect();
        assert_eq!(distinct.len(), 7);
    }

    #[test]
    fn widest_course_is_colored_first() {
        let fps = vec![
            footprint("small", &[(5, 5)]),
            footprint("wide", &[(1, 1), (2, 1), (3, 1)]),
        ];
        let mut colors = ColorAssignment::new();
        let added = colors.extend_with(&fps, 7);
        assert_eq!(added, vec!["wide".to_string(), "small".to_string()]);
        assert_eq!(colors.get("wide"), Some(0));
        assert_eq!(colors.get("small"), Some(1));
    }

    #[test]
    fn conflict_outweighs_usage() {
        // palette of 2: "a" and "b" both take color 0 and 1; "c" sits next to
        // "a" only, so it must take b's color even though usage is equal.
        let fps = vec![
            footprint("a", &[(1, 1), (1, 2)]),
            footprint("b", &[(5, 5), (6, 5)]),
            footprint("c", &[(2, 1)]),
        ];
        let colors = assign_colors(&ColorAssignment::new(), &fps, 2);
        assert_eq!(colors.get("a"), Some(0));
        assert_eq!(colors.get("b"), Some(1));
        assert_eq!(colors.get("c"), Some(1));
    }

    #[test]
    fn exhausted_palette_still_assigns() {
        let fps: Vec<CourseFootprint> = (1..=5u8)
            .map(|d| footprint(&format!("n{d}"), &[(d, 1)]))
            .collect();
        let colors = assign_colors(&ColorAssignment::new(), &fps, 1);
        assert_eq!(colors.len(), 5);
        assert!(colors.iter().all(|(_, c)| c == 0));
        assert!(assign_colors(&ColorAssignment::new(), &fps, 0).is_empty());
    }

    #[test]
    fn existing_colors_are_kept_and_scored_against() {
        let mut existing = ColorAssignment::new();
        existing.extend_with(&[footprint("old", &[(1, 1)])], 7);
        assert_eq!(existing.get("old"), Some(0));

        let fps = vec![footprint("new", &[(1, 1), (1, 2), (1, 3)]), footprint("old", &[(1, 1)])];
        let updated = assign_colors(&existing, &fps, 7);
        assert_eq!(updated.get("old"), Some(0));
        assert_eq!(updated.get("new"), Some(1));
    }

    proptest! {
        #[test]
        fn adding_names_never_recolors(
            first in prop::collection::vec((0usize..6, 1u8..=7, 1u8..=5), 0..20),
            later in prop::collection::vec((0usize..12, 1u8..=7, 1u8..=5), 0..20),
        ) {
            let build = |cells: &[(usize, u8, u8)]| -> Vec<CourseRecord> {
                cells.iter().map(|&(n, d, s)| record(&format!("course-{n}"), d, &[s])).collect()
            };
            let before = group_by_weekday(build(&first));
            let colors = assign_colors(&ColorAssignment::new(), &footprints(&before), 7);

            let mut all = build(&first);
            all.extend(build(&later));
            let after = group_by_weekday(all);
            let updated = assign_colors(&colors, &footprints(&after), 7);

            for (name, color) in colors.iter() {
                prop_assert_eq!(updated.get(name), Some(color));
            }
            for f in footprints(&after) {
                prop_assert!(updated.get(&f.name).is_some());
            }
        }

        #[test]
        fn assignment_is_deterministic(
            cells in prop::collection::vec((0usize..8, 1u8..=7, 1u8..=5), 0..25),
        ) {
            let records: Vec<CourseRecord> = cells
                .iter()
                .map(|&(n, d, s)| record(&format!("c{n}"), d, &[s]))
                .collect();
            let merged = group_by_weekday(records);
            let a = assign_colors(&ColorAssignment::new(), &footprints(&merged), 7);
            let b = assign_colors(&ColorAssignment::new(), &footprints(&merged), 7);
            prop_assert_eq!(a, b);
        }
    }
}
