//! Course lookup over a snapshot, and the per-course standing shown to students.

use std::collections::HashMap;

use crate::grouper::NO_PREREQUISITES;
use crate::model::{CourseRecord, Semester};
use crate::status::StatusTag;

/// Aggregate state of a course's prerequisites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrerequisiteState {
    pub all_cleared: bool,
    pub any_in_progress: bool,
}

/// Display class of a single prerequisite entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrerequisiteMark {
    None,
    Cleared,
    InProgress,
    ToBeTaken,
}

/// A prerequisite entry resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteItem<'a> {
    pub label: &'a str,
    pub mark: PrerequisiteMark,
}

/// What a student can currently do about a course, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseStanding {
    Cleared { grade: String },
    InProgress,
    PrerequisitesNotCleared,
    PrerequisitesInProgress,
    NoSlotsAvailable,
    Available,
}

impl CourseStanding {
    pub fn message(&self) -> String {
        match self {
            Self::Cleared { grade } => format!("Cleared: {grade}"),
            Self::InProgress => "Currently In Progress".to_string(),
            Self::PrerequisitesNotCleared => "Prerequisites not cleared".to_string(),
            Self::PrerequisitesInProgress => "Prerequisites in progress".to_string(),
            Self::NoSlotsAvailable => "No slots available".to_string(),
            Self::Available => "Available".to_string(),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Cleared { .. } => "status-cleared",
            Self::InProgress | Self::PrerequisitesInProgress => "status-in-progress",
            Self::PrerequisitesNotCleared => "status-not-cleared",
            Self::NoSlotsAvailable => "status-not-available",
            Self::Available => "status-available",
        }
    }
}

/// `courseCode → CourseRecord` index over all semesters of a snapshot.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    courses: HashMap<&'a str, &'a CourseRecord>,
}

impl<'a> Catalog<'a> {
    pub fn new(semesters: &'a [Semester]) -> Self {
        let mut courses = HashMap::new();
        for course in semesters.iter().flat_map(|s| &s.courses) {
            courses.entry(course.course_code.as_str()).or_insert(course);
        }
        Self { courses }
    }

    pub fn get(&self, code: &str) -> Option<&'a CourseRecord> {
        self.courses.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Resolve prerequisites against the catalog. Unknown codes and the
    /// `"None"` sentinel are ignored.
    pub fn prerequisite_state(&self, course: &CourseRecord) -> PrerequisiteState {
        let mut state = PrerequisiteState {
            all_cleared: true,
            any_in_progress: false,
        };
        for code in &course.pre_requisites {
            if code == NO_PREREQUISITES {
                continue;
            }
            match self.get(code).map(|c| c.status) {
                Some(StatusTag::Cleared) => {}
                Some(StatusTag::InProgress) => state.any_in_progress = true,
                Some(_) => state.all_cleared = false,
                None => {}
            }
        }
        state
    }

    /// Prerequisites with the course name substituted where the code is known.
    pub fn prerequisite_items(&self, course: &'a CourseRecord) -> Vec<PrerequisiteItem<'a>> {
        course
            .pre_requisites
            .iter()
            .map(|code| {
                if code == NO_PREREQUISITES {
                    return PrerequisiteItem {
                        label: code,
                        mark: PrerequisiteMark::None,
                    };
                }
                match self.get(code) {
                    Some(found) => PrerequisiteItem {
                        label: &found.name,
                        mark: match found.status {
                            StatusTag::Cleared => PrerequisiteMark::Cleared,
                            StatusTag::InProgress => PrerequisiteMark::InProgress,
                            _ => PrerequisiteMark::ToBeTaken,
                        },
                    },
                    None => PrerequisiteItem {
                        label: code,
                        mark: PrerequisiteMark::ToBeTaken,
                    },
                }
            })
            .collect()
    }

    pub fn standing(&self, course: &CourseRecord) -> CourseStanding {
        let prereqs = self.prerequisite_state(course);
        match course.status {
            StatusTag::Cleared => CourseStanding::Cleared {
                grade: if course.grade.is_empty() {
                    "N/A".to_string()
                } else {
                    course.grade.clone()
                },
            },
            StatusTag::InProgress => CourseStanding::InProgress,
            _ if !prereqs.all_cleared => CourseStanding::PrerequisitesNotCleared,
            _ if prereqs.any_in_progress => CourseStanding::PrerequisitesInProgress,
            _ if !course.has_available_slot() => CourseStanding::NoSlotsAvailable,
            _ => CourseStanding::Available,
        }
    }
}
