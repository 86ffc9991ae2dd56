//! Calendar grid layout for chosen slots.
//!
//! The grid has one column per weekday (Monday-first, the same weekday
//! mapping conflict detection uses) and one row per 30 minutes of the
//! display window. Each timing becomes exactly one block anchored at its
//! first covered row; the rows below it are implied by the block's span.

use chrono::{NaiveTime, Timelike, Weekday};
use tracing::debug;

use crate::model::Slot;
use crate::timing::Timing;

/// Minutes per grid row.
pub const ROW_MINUTES: u32 = 30;

/// Grid columns, Monday-first.
pub const DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Column of a weekday in the grid.
pub fn day_column(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

fn fractional_hours(t: NaiveTime) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Time range covered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for CalendarWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(21, 30, 0).unwrap_or_default(),
        }
    }
}

impl CalendarWindow {
    /// A window with `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Number of 30-minute rows between start and end.
    pub fn rows(&self) -> usize {
        let minutes = (self.end - self.start).num_minutes().max(0) as usize;
        minutes.div_ceil(ROW_MINUTES as usize)
    }

    /// Start time of a row.
    pub fn row_time(&self, row: usize) -> NaiveTime {
        self.start + chrono::Duration::minutes((row as i64) * i64::from(ROW_MINUTES))
    }
}

/// A course with the slot chosen for it.
#[derive(Debug, Clone, Copy)]
pub struct ChosenSlot<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub slot: &'a Slot,
}

/// One timing placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarBlock {
    pub course_code: String,
    pub course_name: String,
    pub initials: String,
    pub color: String,
    pub day: Weekday,
    pub column: usize,
    pub row: usize,
    pub span: usize,
    pub timing: Timing,
}

impl CalendarBlock {
    pub fn covers(&self, column: usize, row: usize) -> bool {
        self.column == column && row >= self.row && row < self.row + self.span
    }
}

/// A timing that could not be placed, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Unplaced {
    pub course_code: String,
    pub timing: Timing,
    pub reason: &'static str,
}

/// Layout of all chosen slots on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarLayout {
    pub window: CalendarWindow,
    pub blocks: Vec<CalendarBlock>,
    pub unplaced: Vec<Unplaced>,
}

impl CalendarLayout {
    /// Blocks anchored at a cell; the cell a block is rendered in.
    pub fn starting_at(&self, column: usize, row: usize) -> impl Iterator<Item = &CalendarBlock> {
        self.blocks
            .iter()
            .filter(move |b| b.column == column && b.row == row)
    }

    /// Blocks covering a cell, anchored there or spanning through it.
    pub fn covering(&self, column: usize, row: usize) -> impl Iterator<Item = &CalendarBlock> {
        self.blocks.iter().filter(move |b| b.covers(column, row))
    }
}

/// Initials shown inside a block: first letters of the name's words, plus
/// `-X` for a parenthesised part, so `"Data Structures (Lab)"` → `"DS-L"`.
pub fn course_initials(name: &str) -> String {
    let (main, lab) = match name.split_once('(') {
        Some((main, rest)) => (main, rest.split(')').next()),
        None => (name, None),
    };
    let mut initials: String = main
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if let Some(first) = lab.and_then(|l| l.trim().chars().next()) {
        initials.push('-');
        initials.extend(first.to_uppercase());
    }
    initials
}

/// Colour for the n-th chosen course, spread around the hue circle.
pub fn course_color(index: usize) -> String {
    let hue = (index as f64 * 137.5) % 360.0;
    format!("hsl({hue}, 70%, 65%)")
}

/// Grid row and span of a timing, before clipping to the window.
///
/// Row is `round((start - window_start) * 2)`, span is
/// `ceil((end - start) * 2)`, both in fractional hours.
pub fn grid_position(window: &CalendarWindow, start: NaiveTime, end: NaiveTime) -> (i64, i64) {
    let rows_per_hour = f64::from(60 / ROW_MINUTES);
    let origin = fractional_hours(window.start);
    let (start, end) = (fractional_hours(start), fractional_hours(end));
    let row = ((start - origin) * rows_per_hour).round() as i64;
    let span = ((end - start) * rows_per_hour).ceil() as i64;
    (row, span)
}

/// Map chosen slots onto the grid.
pub fn layout(chosen: &[ChosenSlot<'_>], window: CalendarWindow) -> CalendarLayout {
    let total_rows = window.rows() as i64;
    let mut blocks = Vec::new();
    let mut unplaced = Vec::new();

    for (index, choice) in chosen.iter().enumerate() {
        let initials = course_initials(choice.name);
        let color = course_color(index);

        for timing in &choice.slot.timings {
            let Some((day, start, end)) = timing.interval() else {
                unplaced.push(Unplaced {
                    course_code: choice.code.to_string(),
                    timing: timing.clone(),
                    reason: "unparseable day or time",
                });
                continue;
            };

            let (row, span) = grid_position(&window, start, end);
            let first = row.max(0);
            let last = (row + span).min(total_rows);
            if first >= last {
                debug!(code = choice.code, day = %timing.day, "timing outside display window");
                unplaced.push(Unplaced {
                    course_code: choice.code.to_string(),
                    timing: timing.clone(),
                    reason: "outside display window",
                });
                continue;
            }

            blocks.push(CalendarBlock {
                course_code: choice.code.to_string(),
                course_name: choice.name.to_string(),
                initials: initials.clone(),
                color: color.clone(),
                day,
                column: day_column(day),
                row: first as usize,
                span: (last - first) as usize,
                timing: timing.clone(),
            });
        }
    }

    CalendarLayout {
        window,
        blocks,
        unplaced,
    }
}

/// One entry of the per-day agenda view.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub course_code: String,
    pub course_name: String,
    pub color: String,
    pub timing: Timing,
}

/// Per weekday, the chosen courses meeting that day in start-time order.
pub fn agenda(chosen: &[ChosenSlot<'_>]) -> Vec<(Weekday, Vec<AgendaEntry>)> {
    DAYS.iter()
        .map(|&day| {
            let mut entries: Vec<(NaiveTime, AgendaEntry)> = chosen
                .iter()
                .enumerate()
                .flat_map(|(index, choice)| {
                    choice.slot.timings.iter().filter_map(move |timing| {
                        let (d, start, _) = timing.interval()?;
                        (d == day).then(|| {
                            let entry = AgendaEntry {
                                course_code: choice.code.to_string(),
                                course_name: choice.name.to_string(),
                                color: course_color(index),
                                timing: timing.clone(),
                            };
                            (start, entry)
                        })
                    })
                })
                .collect();
            entries.sort_by_key(|(start, _)| *start);
            (day, entries.into_iter().map(|(_, e)| e).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SlotId;
    use crate::status::StatusTag;

    fn slot(timings: &[(&str, &str, &str)]) -> Slot {
        Slot {
            slot_id: SlotId::Position(1),
            input_id: None,
            timings: timings
                .iter()
                .map(|(d, s, e)| Timing::new(d, s, e, "R1"))
                .collect(),
            faculty_name: String::new(),
            status: StatusTag::Available,
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn nine_to_ten_thirty_is_row_two_span_three() {
        let s = slot(&[("MON", "09:00", "10:30")]);
        let chosen = [ChosenSlot { code: "CS101", name: "Programming", slot: &s }];
        let layout = layout(&chosen, CalendarWindow::default());
        assert_eq!(layout.blocks.len(), 1);
        let block = &layout.blocks[0];
        assert_eq!(block.row, 2);
        assert_eq!(block.span, 3);
        assert_eq!(block.column, 0);
        assert_eq!(block.day, Weekday::Mon);
    }

    #[test]
    fn default_window_has_27_rows() {
        let window = CalendarWindow::default();
        assert_eq!(window.rows(), 27);
        assert_eq!(window.row_time(0), t(8, 0));
        assert_eq!(window.row_time(26), t(21, 0));
    }

    #[test]
    fn block_is_anchored_once() {
        let s = slot(&[("WED", "11:00", "12:30")]);
        let chosen = [ChosenSlot { code: "MA201", name: "Linear Algebra", slot: &s }];
        let layout = layout(&chosen, CalendarWindow::default());
        let col = day_column(Weekday::Wed);
        assert_eq!(layout.starting_at(col, 6).count(), 1);
        assert_eq!(layout.starting_at(col, 7).count(), 0);
        assert_eq!(layout.covering(col, 7).count(), 1);
        assert_eq!(layout.covering(col, 8).count(), 1);
        assert_eq!(layout.covering(col, 9).count(), 0);
    }

    #[test]
    fn odd_durations_round_up_span() {
        assert_eq!(grid_position(&CalendarWindow::default(), t(9, 50), t(11, 5)), (4, 3));
        assert_eq!(grid_position(&CalendarWindow::default(), t(8, 0), t(8, 50)), (0, 2));
    }

    #[test]
    fn columns_follow_weekday_parsing() {
        let s = slot(&[("FRI", "08:00", "09:00"), ("Sunday", "10:00", "11:00")]);
        let chosen = [ChosenSlot { code: "X", name: "X", slot: &s }];
        let layout = layout(&chosen, CalendarWindow::default());
        assert_eq!(layout.blocks[0].column, 4);
        assert_eq!(layout.blocks[1].column, 6);
    }

    #[test]
    fn outside_window_is_unplaced_and_overhang_clipped() {
        let s = slot(&[("MON", "06:00", "07:30"), ("TUE", "21:00", "23:00"), ("WED", "07:00", "09:00")]);
        let chosen = [ChosenSlot { code: "EV100", name: "Evening", slot: &s }];
        let layout = layout(&chosen, CalendarWindow::default());
        assert_eq!(layout.unplaced.len(), 1);
        assert_eq!(layout.unplaced[0].timing.day, "MON");
        let tue = &layout.blocks[0];
        assert_eq!((tue.row, tue.span), (26, 1));
        let wed = &layout.blocks[1];
        assert_eq!((wed.row, wed.span), (0, 2));
    }

    #[test]
    fn unparseable_timing_is_unplaced() {
        let s = slot(&[("MON", "TBA", "TBA")]);
        let chosen = [ChosenSlot { code: "X", name: "X", slot: &s }];
        let layout = layout(&chosen, CalendarWindow::default());
        assert!(layout.blocks.is_empty());
        assert_eq!(layout.unplaced[0].reason, "unparseable day or time");
    }

    #[test]
    fn initials() {
        assert_eq!(course_initials("Data Structures (Lab)"), "DS-L");
        assert_eq!(course_initials("Operating Systems"), "OS");
        assert_eq!(course_initials("calculus"), "C");
        assert_eq!(course_initials(""), "");
    }

    #[test]
    fn colors_spread_by_index() {
        assert_eq!(course_color(0), "hsl(0, 70%, 65%)");
        assert_eq!(course_color(1), "hsl(137.5, 70%, 65%)");
        assert_eq!(course_color(2), "hsl(275, 70%, 65%)");
        assert_eq!(course_color(3), "hsl(52.5, 70%, 65%)");
    }

    #[test]
    fn agenda_sorts_by_start() {
        let late = slot(&[("MON", "14:00", "15:00")]);
        let early = slot(&[("MON", "09:00", "10:00"), ("TUE", "09:00", "10:00")]);
        let chosen = [
            ChosenSlot { code: "LATE", name: "Late", slot: &late },
            ChosenSlot { code: "EARLY", name: "Early", slot: &early },
        ];
        let days = agenda(&chosen);
        assert_eq!(days.len(), 7);
        let (mon, entries) = &days[0];
        assert_eq!(*mon, Weekday::Mon);
        let codes: Vec<&str> = entries.iter().map(|e| e.course_code.as_str()).collect();
        assert_eq!(codes, vec!["EARLY", "LATE"]);
        assert_eq!(days[1].1.len(), 1);
        assert!(days[2].1.is_empty());
    }
}
