//! One scraped registration table row → [`RawCourseRow`].
//!
//! Column contract of the portal's course table:
//!
//! | cell | content                      |
//! |------|------------------------------|
//! | 0    | status markers (see [`Marker`]) |
//! | 1    | course code                  |
//! | 2    | prerequisite text            |
//! | 3    | credits                      |
//! | 4    | course name                  |
//! | 5    | grade                        |
//! | 6    | faculty name                 |
//! | 7    | timing cell                  |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::status::StatusTag;
use crate::timing::{Timing, parse_timing_cell};

/// Marker element found inside a row's status cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Marker {
    Tick,
    Lock,
    Cross,
    Checkbox {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        checked: bool,
    },
}

/// A table row as read off the page: cell texts plus the status cell's markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedRow {
    #[serde(default)]
    pub cells: Vec<String>,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl ScrapedRow {
    pub fn new(cells: &[&str], markers: Vec<Marker>) -> Self {
        Self {
            cells: cells.iter().map(|c| c.to_string()).collect(),
            markers,
        }
    }

    /// Identifier of the status cell's checkbox, if it has one.
    pub fn input_id(&self) -> Option<&str> {
        self.markers.iter().find_map(|m| match m {
            Marker::Checkbox { id: Some(id), .. } if !id.is_empty() => Some(id.as_str()),
            _ => None,
        })
    }

    /// Whether the status cell's checkbox is checked on the page.
    pub fn is_checked(&self) -> bool {
        self.markers
            .iter()
            .any(|m| matches!(m, Marker::Checkbox { checked: true, .. }))
    }

    fn cell(&self, index: usize) -> String {
        self.cells
            .get(index)
            .map(|c| c.trim().to_string())
            .unwrap_or_default()
    }
}

/// A parsed course row, before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCourseRow {
    pub semester: String,
    pub status: StatusTag,
    pub input_id: Option<String>,
    pub course_code: String,
    pub pre_requisite: String,
    pub credits: f64,
    pub course_name: String,
    pub grade: String,
    pub faculty_name: String,
    pub timings: Vec<Timing>,
}

/// Map the status cell's markers to a status, in priority order
/// tick, lock, cross, checkbox.
pub fn status_from_markers(markers: &[Marker]) -> StatusTag {
    let has = |pred: fn(&Marker) -> bool| markers.iter().any(pred);
    if has(|m| matches!(m, Marker::Tick)) {
        StatusTag::Cleared
    } else if has(|m| matches!(m, Marker::Lock)) {
        StatusTag::Locked
    } else if has(|m| matches!(m, Marker::Cross)) {
        StatusTag::NotOffered
    } else if has(|m| matches!(m, Marker::Checkbox { .. })) {
        StatusTag::Available
    } else {
        StatusTag::Unknown
    }
}

/// Parse a credits cell the way a lenient numeric reader would: the longest
/// leading decimal number, `0` when there is none. Negative values clamp to `0`.
pub fn parse_credits(text: &str) -> f64 {
    let text = text.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in text.char_indices() {
        match ch {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            '-' | '+' if i == 0 => {}
            _ => break,
        }
    }
    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.max(0.0))
}

/// Parse one scraped row. Rows with no cells yield `None`.
pub fn parse_row(row: &ScrapedRow, semester: &str) -> Option<RawCourseRow> {
    if row.cells.is_empty() {
        debug!(semester, "discarding row with no cells");
        return None;
    }

    Some(RawCourseRow {
        semester: semester.to_string(),
        status: status_from_markers(&row.markers),
        input_id: row.input_id().map(str::to_string),
        course_code: row.cell(1),
        pre_requisite: row.cell(2),
        credits: parse_credits(&row.cell(3)),
        course_name: row.cell(4),
        grade: row.cell(5),
        faculty_name: row.cell(6),
        timings: parse_timing_cell(&row.cell(7)),
    })
}
