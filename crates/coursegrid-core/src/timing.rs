//! Timing-cell parsing.
//!
//! A timing cell is a comma-separated list of entries such as
//! `"MON 09:00 10:30 R101, TUE 14:00 15:00"`. Parsing is lenient: an entry
//! that does not fit the `DAY START END [ROOM]` shape degrades to nothing
//! rather than failing the row.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One weekly meeting of a slot, kept as the portal wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub room: String,
}

impl Timing {
    pub fn new(day: &str, start_time: &str, end_time: &str, room: &str) -> Self {
        Self {
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            room: room.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_empty() && self.start_time.is_empty() && self.end_time.is_empty() && self.room.is_empty()
    }

    pub fn weekday(&self) -> Option<Weekday> {
        parse_weekday(&self.day)
    }

    pub fn start(&self) -> Option<NaiveTime> {
        parse_clock(&self.start_time)
    }

    pub fn end(&self) -> Option<NaiveTime> {
        parse_clock(&self.end_time)
    }

    /// Day and time range, when all three parse and the range is non-empty.
    pub fn interval(&self) -> Option<(Weekday, NaiveTime, NaiveTime)> {
        let (start, end) = (self.start()?, self.end()?);
        (start < end).then_some((self.weekday()?, start, end))
    }

    /// Both times parse but do not form a forward range.
    fn is_inverted(&self) -> bool {
        matches!((self.start(), self.end()), (Some(s), Some(e)) if s >= e)
    }

    /// Render back to the single-entry cell form.
    pub fn to_cell_entry(&self) -> String {
        [&self.day, &self.start_time, &self.end_time, &self.room]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse a weekday token: the three-letter code (`MON`) or the full name
/// (`Monday`), case-insensitive.
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    token.trim().parse::<Weekday>().ok()
}

/// Three-letter upper-case code for a weekday.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

/// Parse `HH:MM` (24-hour, one- or two-digit hour).
pub fn parse_clock(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").ok()
}

/// Parse a timing cell into its entries.
///
/// Each comma-separated entry is split on whitespace: four tokens give
/// `(day, start, end, room)`, three give `(day, start, end)` with an empty
/// room, any other count gives nothing. Entries whose times parse but are
/// not a forward range are dropped too.
pub fn parse_timing_cell(cell: &str) -> Vec<Timing> {
    cell.split(',')
        .map(parse_entry)
        .filter(|timing| {
            if timing.is_empty() {
                return false;
            }
            if timing.is_inverted() {
                debug!(day = %timing.day, start = %timing.start_time, end = %timing.end_time, "dropping inverted timing");
                return false;
            }
            true
        })
        .collect()
}

fn parse_entry(entry: &str) -> Timing {
    let parts: Vec<&str> = entry.split_whitespace().collect();
    match parts.as_slice() {
        [day, start, end, room] => Timing::new(day, start, end, room),
        [day, start, end] => Timing::new(day, start, end, ""),
        [] => Timing::default(),
        _ => {
            debug!(entry = entry.trim(), tokens = parts.len(), "skipping malformed timing entry");
            Timing::default()
        }
    }
}

/// Render timings back into a cell string.
pub fn to_timing_cell(timings: &[Timing]) -> String {
    timings.iter().map(Timing::to_cell_entry).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_entries_second_without_room() {
        let timings = parse_timing_cell("MON 09:00 10:30 R101, TUE 14:00 15:00");
        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0], Timing::new("MON", "09:00", "10:30", "R101"));
        assert_eq!(timings[1], Timing::new("TUE", "14:00", "15:00", ""));
        assert_eq!(timings[1].room, "");
    }

    #[test]
    fn empty_cell_has_no_timings() {
        assert!(parse_timing_cell("").is_empty());
        assert!(parse_timing_cell("  ,  , ").is_empty());
    }

    #[test]
    fn wrong_token_counts_are_dropped() {
        let timings = parse_timing_cell("MON 09:00, TUE 14:00 15:00 Lab 3, WED 08:00 09:00");
        assert_eq!(timings, vec![Timing::new("WED", "08:00", "09:00", "")]);
    }

    #[test]
    fn inverted_range_is_dropped() {
        assert!(parse_timing_cell("MON 10:00 09:00").is_empty());
        assert!(parse_timing_cell("MON 10:00 10:00 R1").is_empty());
    }

    #[test]
    fn unparseable_times_are_kept_verbatim() {
        let timings = parse_timing_cell("MON TBA TBA");
        assert_eq!(timings, vec![Timing::new("MON", "TBA", "TBA", "")]);
        assert!(timings[0].interval().is_none());
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let timings = parse_timing_cell("  THU   08:30  10:00   B-12 ");
        assert_eq!(timings, vec![Timing::new("THU", "08:30", "10:00", "B-12")]);
    }

    #[test]
    fn weekday_codes_and_full_names() {
        assert_eq!(parse_weekday("MON"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("sun"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("XYZ"), None);
        assert_eq!(weekday_code(Weekday::Thu), "THU");
    }

    #[test]
    fn interval_requires_parseable_forward_range() {
        let t = Timing::new("FRI", "9:00", "10:15", "");
        let (day, start, end) = t.interval().unwrap();
        assert_eq!(day, Weekday::Fri);
        assert_eq!(start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(end, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
        assert!(Timing::new("XXX", "09:00", "10:00", "").interval().is_none());
    }

    #[test]
    fn cell_rendering_reparses() {
        let cell = "MON 09:00 10:30 R101, TUE 14:00 15:00";
        let timings = parse_timing_cell(cell);
        assert_eq!(to_timing_cell(&timings), cell);
    }
}
