use crate::course::CourseRecord;
use crate::merge::WeekBuckets;
use crate::parse::{SLOT_COUNT, WEEKDAY_COUNT};

/// Which weeks a resolution looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekFilter {
    Week(i32),
    AllWeeks,
}

impl WeekFilter {
    pub fn new(week: i32, show_all_weeks: bool) -> Self {
        if show_all_weeks {
            WeekFilter::AllWeeks
        } else {
            WeekFilter::Week(week)
        }
    }

    fn admits(&self, record: &CourseRecord) -> bool {
        match self {
            WeekFilter::AllWeeks => true,
            WeekFilter::Week(w) => record.is_in_week(*w),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub weekday: u8,
    pub slot: u8,
    /// Every matching record, in merge order.
    pub active: Vec<&'a CourseRecord>,
    pub primary: Option<&'a CourseRecord>,
}

impl<'a> GridCell<'a> {
    pub fn is_active(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_overlap(&self) -> bool {
        self.active.len() > 1
    }
}

/// Earliest first week wins; on a tie the record seen first stays.
pub fn select_primary<'a>(active: &[&'a CourseRecord]) -> Option<&'a CourseRecord> {
    let mut primary: Option<&'a CourseRecord> = None;
    for &record in active {
        match primary {
            Some(p) if record.first_week() >= p.first_week() => {}
            _ => primary = Some(record),
        }
    }
    primary
}

pub fn resolve_cell<'a>(
    merged: &'a WeekBuckets,
    weekday: u8,
    slot: u8,
    filter: WeekFilter,
) -> GridCell<'a> {
    let active: Vec<&'a CourseRecord> = merged
        .day(weekday)
        .iter()
        .filter(|r| r.is_in_time_slot(weekday, slot) && filter.admits(r))
        .collect();
    let primary = select_primary(&active);
    GridCell {
        weekday,
        slot,
        active,
        primary,
    }
}

/// The 7 × 5 grid for one filter. Cells are stored slot-major so a row of
/// the timetable is one contiguous run of seven weekdays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<'a> {
    cells: Vec<GridCell<'a>>,
}

impl<'a> Grid<'a> {
    #[allow(dead_code)]
    pub fn cell(&self, weekday: u8, slot: u8) -> Option<&GridCell<'a>> {
        if !(1..=WEEKDAY_COUNT).contains(&weekday) || !(1..=SLOT_COUNT).contains(&slot) {
            return None;
        }
        let idx = usize::from(slot - 1) * usize::from(WEEKDAY_COUNT) + usize::from(weekday - 1);
        self.cells.get(idx)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(usize::from(WEEKDAY_COUNT))
    }

    #[allow(dead_code)]
    pub fn cells(&self) -> &[GridCell<'a>] {
        &self.cells
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_active()).count()
    }
}

pub fn resolve_grid(merged: &WeekBuckets, filter: WeekFilter) -> Grid<'_> {
    let mut cells = Vec::with_capacity(usize::from(SLOT_COUNT) * usize::from(WEEKDAY_COUNT));
    for slot in 1..=SLOT_COUNT {
        for weekday in 1..=WEEKDAY_COUNT {
            cells.push(resolve_cell(merged, weekday, slot, filter));
        }
    }
    Grid { cells }
}

/// One weekday column of a specific week, slots 1..=5.
pub fn resolve_day(merged: &WeekBuckets, weekday: u8, week: i32) -> Vec<GridCell<'_>> {
    (1..=SLOT_COUNT)
        .map(|slot| resolve_cell(merged, weekday, slot, WeekFilter::Week(week)))
        .collect()
}
