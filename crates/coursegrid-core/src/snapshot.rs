//! One normalisation run: scrape dump in, canonical snapshot out.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dump::ScrapeDump;
use crate::error::CoreError;
use crate::grouper::{group_rows, into_semesters};
use crate::model::Semester;
use crate::row::{RawCourseRow, ScrapedRow, parse_row};
use crate::semester::classify_semester;
use crate::student::StudentInfo;

/// The artefact of a run, replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub student_info: StudentInfo,
    #[serde(default)]
    pub selected_course_ids: Vec<String>,
    pub semesters: Vec<Semester>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}

/// Parse rows that all sit under one section header.
pub fn parse_section<'a>(header: &str, rows: impl IntoIterator<Item = &'a ScrapedRow>) -> Vec<RawCourseRow> {
    let semester = classify_semester(header);
    rows.into_iter()
        .filter_map(|row| parse_row(row, &semester))
        .collect()
}

/// Group already-parsed rows into sorted semesters.
pub fn build_semesters(rows: Vec<RawCourseRow>) -> Vec<Semester> {
    into_semesters(group_rows(rows))
}

/// Run the full pipeline over a scrape dump.
pub fn normalize(dump: &ScrapeDump) -> Snapshot {
    let rows: Vec<RawCourseRow> = dump
        .sections
        .iter()
        .flat_map(|section| parse_section(&section.header, section.body()))
        .collect();
    let row_count = rows.len();

    let semesters = build_semesters(rows);
    let snapshot = Snapshot {
        student_info: StudentInfo::from_rows(&dump.student_info),
        selected_course_ids: dump.checked_ids(),
        semesters,
    };

    info!(
        rows = row_count,
        courses = snapshot.course_count(),
        semesters = snapshot.semesters.len(),
        "normalised scrape dump"
    );
    snapshot
}
