//! Canonical schedule model: the persisted/served shape consumed by front ends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::StatusTag;
use crate::timing::Timing;

/// Placeholder the portal prints when no instructor is assigned.
const PLACEHOLDER_FACULTY: &str = "FACULTY MEMBER";

/// Identifier of a slot within its course.
///
/// The checkbox input id when the portal supplies one, otherwise the slot's
/// 1-based position in the course's slot list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotId {
    Position(u32),
    Input(String),
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(n) => write!(f, "{n}"),
            Self::Input(id) => f.write_str(id),
        }
    }
}

/// One offered section of a course: faculty plus weekly timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub slot_id: SlotId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_id: Option<String>,
    #[serde(default)]
    pub timings: Vec<Timing>,
    #[serde(default)]
    pub faculty_name: String,
    #[serde(default)]
    pub status: StatusTag,
}

impl Slot {
    /// Faculty name for display, hiding the portal's placeholder.
    pub fn display_faculty(&self) -> &str {
        if self.faculty_name == PLACEHOLDER_FACULTY {
            "N/A"
        } else {
            &self.faculty_name
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == StatusTag::Available
    }
}

/// A course with all of its offered slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseRecord {
    pub course_code: String,
    pub name: String,
    pub status: StatusTag,
    /// One entry per prerequisite line; `["None"]` when there are none.
    pub pre_requisites: Vec<String>,
    pub credits: f64,
    #[serde(rename = "SLOTS")]
    pub slots: Vec<Slot>,
    pub grade: String,
}

impl CourseRecord {
    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| &s.slot_id == id)
    }

    /// Look a slot up by the textual form of its id.
    pub fn slot_by_text(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.slot_id.to_string() == id)
    }

    pub fn has_available_slot(&self) -> bool {
        self.slots.iter().any(Slot::is_available)
    }

    pub fn has_prerequisites(&self) -> bool {
        !matches!(self.pre_requisites.as_slice(), [only] if only == crate::grouper::NO_PREREQUISITES)
    }
}

/// A semester bucket of courses, keyed by unique course code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(rename = "semester")]
    pub label: String,
    pub courses: Vec<CourseRecord>,
}

impl Semester {
    pub fn course(&self, code: &str) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.course_code == code)
    }

    /// Number of courses already cleared, for the `(cleared/total)` header.
    pub fn cleared_count(&self) -> usize {
        self.courses
            .iter()
            .filter(|c| c.status == StatusTag::Cleared)
            .count()
    }
}
