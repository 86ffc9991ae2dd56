//! Terminal rendering of snapshots and timetables.
//!
//! Statuses always go through [`StatusTag::badge`] and course standings
//! through `CourseStanding`, so every view labels things the same way.

use std::io::Write;

use chrono::Weekday;
use coursegrid_core::calendar::{AgendaEntry, CalendarLayout, DAYS};
use coursegrid_core::catalog::{Catalog, PrerequisiteMark};
use coursegrid_core::timing::{to_timing_cell, weekday_code};
use coursegrid_core::{Semester, SelectionSet, Slot, Snapshot, StatusTag};

const KEY_WIDTH: usize = 26;
const CELL_WIDTH: usize = 8;

// ── Snapshot ──

/// Print the student card followed by every semester and its courses.
pub fn print_snapshot(out: &mut impl Write, snapshot: &Snapshot) -> anyhow::Result<()> {
    if !snapshot.student_info.is_empty() {
        writeln!(out, "=== Student ===")?;
        for (key, value) in snapshot.student_info.iter() {
            writeln!(out, "  {key:<KEY_WIDTH$} {value}")?;
        }
        writeln!(out)?;
    }

    let catalog = Catalog::new(&snapshot.semesters);
    for semester in &snapshot.semesters {
        print_semester(out, &catalog, semester)?;
    }
    Ok(())
}

fn print_semester(out: &mut impl Write, catalog: &Catalog<'_>, semester: &Semester) -> anyhow::Result<()> {
    writeln!(
        out,
        "=== {} ({}/{}) ===",
        semester.label,
        semester.cleared_count(),
        semester.courses.len()
    )?;
    for course in &semester.courses {
        let standing = catalog.standing(course);
        writeln!(
            out,
            "  {} - {}  [{} cr]  {}",
            course.course_code,
            course.name,
            course.credits,
            standing.message()
        )?;

        if course.has_prerequisites() {
            let items: Vec<String> = catalog
                .prerequisite_items(course)
                .iter()
                .map(|item| format!("{}{}", item.label, prerequisite_suffix(item.mark)))
                .collect();
            writeln!(out, "    {:<KEY_WIDTH$} {}", "prerequisites", items.join(", "))?;
        }
        for slot in &course.slots {
            writeln!(out, "    {}", slot_line(slot))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn prerequisite_suffix(mark: PrerequisiteMark) -> &'static str {
    match mark {
        PrerequisiteMark::Cleared => " ✓",
        PrerequisiteMark::InProgress => " …",
        PrerequisiteMark::None | PrerequisiteMark::ToBeTaken => "",
    }
}

/// `#c21    Dr. A                    (Available) MON 09:00 10:30 R1, WED 09:00 10:30 R1`
pub fn slot_line(slot: &Slot) -> String {
    format!(
        "#{:<6} {:<24} ({}) {}",
        slot.slot_id.to_string(),
        slot.display_faculty(),
        slot.status.badge().label,
        to_timing_cell(&slot.timings)
    )
    .trim_end()
    .to_string()
}

// ── Selection ──

/// List the chosen slots and, for each, any other chosen course it overlaps.
pub fn print_selection(out: &mut impl Write, selection: &SelectionSet) -> anyhow::Result<()> {
    writeln!(out, "=== Selection ({}) ===", selection.len())?;
    for entry in selection.entries() {
        writeln!(out, "  {} - {}", entry.course_code, entry.course_name)?;
        writeln!(out, "    {}", slot_line(&entry.slot))?;
        if entry.slot.status != StatusTag::Available {
            writeln!(out, "    ! slot is {}", entry.slot.status.badge().label)?;
        }
        let clashes = selection.clashes(&entry.course_code, &entry.slot);
        if !clashes.is_empty() {
            writeln!(out, "    ! clashes with {}", clashes.join(", "))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

// ── Calendar ──

/// Draw the week grid. A block's initials appear in the row it starts at,
/// `|` marks the rows it continues through.
pub fn print_grid(out: &mut impl Write, layout: &CalendarLayout) -> anyhow::Result<()> {
    write!(out, "{:<6}", "")?;
    for day in DAYS {
        write!(out, "{:<CELL_WIDTH$}", weekday_code(day))?;
    }
    writeln!(out)?;

    for row in 0..layout.window.rows() {
        write!(out, "{:<6}", layout.window.row_time(row).format("%H:%M").to_string())?;
        for column in 0..DAYS.len() {
            let starting: Vec<&str> = layout
                .starting_at(column, row)
                .map(|b| b.initials.as_str())
                .collect();
            let cell = if !starting.is_empty() {
                starting.join("/")
            } else if layout.covering(column, row).next().is_some() {
                "|".to_string()
            } else {
                ".".to_string()
            };
            write!(out, "{cell:<CELL_WIDTH$}")?;
        }
        writeln!(out)?;
    }

    if !layout.unplaced.is_empty() {
        writeln!(out)?;
        for item in &layout.unplaced {
            writeln!(
                out,
                "  not shown: {} {} ({})",
                item.course_code,
                item.timing.to_cell_entry(),
                item.reason
            )?;
        }
    }
    Ok(())
}

/// Per-day list of meetings in start-time order.
pub fn print_agenda(out: &mut impl Write, days: &[(Weekday, Vec<AgendaEntry>)]) -> anyhow::Result<()> {
    for (day, entries) in days {
        if entries.is_empty() {
            continue;
        }
        writeln!(out, "{}", weekday_code(*day))?;
        for entry in entries {
            writeln!(
                out,
                "  {}-{}  {} {}",
                entry.timing.start_time, entry.timing.end_time, entry.course_code, entry.timing.room
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegrid_core::{CalendarWindow, ScrapeDump, layout, normalize};

    const DUMP: &str = r#"{
        "studentInfo": [["Name:", "Ada"]],
        "sections": [
            { "header": "Semester 1",
              "rows": [
                { "cells": ["Status"] },
                { "cells": ["", "CS101", "-", "3", "Programming", "A", "Dr. B", ""],
                  "markers": [{ "kind": "tick" }] }
              ] },
            { "header": "Semester 2",
              "rows": [
                { "cells": ["Status"] },
                { "cells": ["", "CS201", "CS101", "3", "Data Structures (Lab)", "To be taken", "FACULTY MEMBER", "MON 09:00 10:30 R1"],
                  "markers": [{ "kind": "checkbox", "id": "c21", "checked": true }] },
                { "cells": ["", "MA201", "-", "3", "Linear Algebra", "To be taken", "Dr. C", "MON 10:00 11:00 R2"],
                  "markers": [{ "kind": "checkbox", "id": "c22", "checked": true }] }
              ] }
        ]
    }"#;

    fn snapshot() -> Snapshot {
        normalize(&ScrapeDump::from_json(DUMP).unwrap())
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn snapshot_view() {
        let snapshot = snapshot();
        let text = render(|out| print_snapshot(out, &snapshot));
        assert!(text.contains("=== Student ==="));
        assert!(text.contains("=== Semester 1 (1/1) ==="));
        assert!(text.contains("=== Semester 2 (0/2) ==="));
        assert!(text.contains("CS101 - Programming  [3 cr]  Cleared: A"));
        assert!(text.contains("CS201 - Data Structures (Lab)  [3 cr]  Available"));
        assert!(text.contains("Programming ✓"));
        assert!(text.contains("#c21"));
        assert!(text.contains("N/A"));
        assert!(!text.contains("FACULTY MEMBER"));
    }

    #[test]
    fn preselected_clash_is_reported() {
        let snapshot = snapshot();
        let selection = SelectionSet::preselect(&snapshot.semesters, &snapshot.selected_course_ids);
        let text = render(|out| print_selection(out, &selection));
        assert!(text.contains("=== Selection (2) ==="));
        assert!(text.contains("! clashes with MA201"));
        assert!(text.contains("! clashes with CS201"));
    }

    #[test]
    fn grid_marks_start_and_continuation() {
        let snapshot = snapshot();
        let selection = SelectionSet::preselect(&snapshot.semesters, &snapshot.selected_course_ids);
        let layout = layout(&selection.chosen(), CalendarWindow::default());
        let text = render(|out| print_grid(out, &layout));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("MON"));
        assert_eq!(lines.len(), 1 + 27);
        assert!(lines[3].starts_with("09:00 DS-L"));
        assert!(lines[4].starts_with("09:30 |"));
        assert!(lines[5].starts_with("10:00 LA"));
    }

    #[test]
    fn slot_line_hides_placeholder_faculty() {
        let snapshot = snapshot();
        let slot = &snapshot.semesters[1].courses[0].slots[0];
        let line = slot_line(slot);
        assert!(line.starts_with("#c21"));
        assert!(line.contains("(Available)"));
        assert!(line.ends_with("MON 09:00 10:30 R1"));
    }
}
