//! Time-conflict detection between two slots' weekly timings.
//!
//! Every timing is placed on one fixed reference week (Monday-first) so a
//! weekday plus `HH:MM` becomes a comparable instant. Two timings overlap
//! iff `a.start < b.end && b.start < a.end`; touching ranges do not conflict.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::model::Slot;
use crate::timing::Timing;

/// Monday of the reference week. Any fixed week works; the choice only has
/// to be consistent between the two timings being compared.
const REFERENCE_MONDAY: (i32, u32, u32) = (2024, 1, 1);

/// A timing pinned to the reference week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekInterval {
    pub day: Weekday,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekInterval {
    /// Pin a timing to the reference week. Timings whose day or times do not
    /// parse cannot be placed and yield `None`.
    pub fn of(timing: &Timing) -> Option<Self> {
        let (day, start, end) = timing.interval()?;
        let date = reference_date(day)?;
        Some(Self {
            day,
            start: date.and_time(start),
            end: date.and_time(end),
        })
    }

    pub fn overlaps(&self, other: &WeekInterval) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

fn reference_date(day: Weekday) -> Option<NaiveDate> {
    let (y, m, d) = REFERENCE_MONDAY;
    let monday = NaiveDate::from_ymd_opt(y, m, d)?;
    debug_assert_eq!(monday.weekday(), Weekday::Mon);
    monday.checked_add_days(chrono::Days::new(u64::from(day.num_days_from_monday())))
}

/// Whether any timing of `a` overlaps any timing of `b`.
///
/// Symmetric, and false when either slot has no placeable timings.
/// Callers must not compare a selected slot against its own entry.
pub fn conflicts(a: &Slot, b: &Slot) -> bool {
    let left: Vec<WeekInterval> = a.timings.iter().filter_map(WeekInterval::of).collect();
    if left.is_empty() {
        return false;
    }
    b.timings
        .iter()
        .filter_map(WeekInterval::of)
        .any(|r| left.iter().any(|l| l.overlaps(&r)))
}
