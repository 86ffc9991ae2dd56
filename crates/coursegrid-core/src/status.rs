//! Course and slot status tags, their canonical display table, and the
//! faculty-text override applied to a grouped course.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of statuses a course or slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusTag {
    #[serde(rename = "cleared")]
    Cleared,
    #[serde(rename = "locked")]
    Locked,
    #[serde(rename = "not offered")]
    NotOffered,
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "prerequisites not cleared")]
    PrerequisitesNotCleared,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

/// Display label and style class for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub class: &'static str,
}

// Indexed by `StatusTag as usize`; keep in declaration order.
const BADGES: [StatusBadge; 7] = [
    StatusBadge { label: "Cleared", class: "status-cleared" },
    StatusBadge { label: "Locked", class: "status-locked" },
    StatusBadge { label: "Not Offered", class: "status-not-offered" },
    StatusBadge { label: "Available", class: "status-available" },
    StatusBadge { label: "In Progress", class: "status-in-progress" },
    StatusBadge { label: "Prerequisites not cleared", class: "status-not-cleared" },
    StatusBadge { label: "Unknown", class: "status-unknown" },
];

impl StatusTag {
    pub const ALL: [StatusTag; 7] = [
        Self::Cleared,
        Self::Locked,
        Self::NotOffered,
        Self::Available,
        Self::InProgress,
        Self::PrerequisitesNotCleared,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::Locked => "locked",
            Self::NotOffered => "not offered",
            Self::Available => "available",
            Self::InProgress => "in progress",
            Self::PrerequisitesNotCleared => "prerequisites not cleared",
            Self::Unknown => "unknown",
        }
    }

    /// The canonical badge every renderer uses for this status.
    pub fn badge(&self) -> StatusBadge {
        BADGES[*self as usize]
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Faculty-column texts the portal uses in place of a status marker.
const IN_PROGRESS_TEXT: &str = "In Progress";
const PREREQ_NOT_CLEARED_TEXT: &str = "Pre Requisite not cleared";

/// Derive a grouped course's effective status from its main row.
///
/// Only an `unknown` status is reinterpreted, and only for the two exact
/// faculty texts the portal emits. Everything else passes through.
pub fn resolve_status(status: StatusTag, faculty_name: &str) -> StatusTag {
    match (status, faculty_name) {
        (StatusTag::Unknown, IN_PROGRESS_TEXT) => StatusTag::InProgress,
        (StatusTag::Unknown, PREREQ_NOT_CLEARED_TEXT) => StatusTag::PrerequisitesNotCleared,
        (other, _) => other,
    }
}

/// Grade text the portal shows for courses not yet taken.
const NOT_TAKEN_GRADE: &str = "To be taken";

/// Normalise the grade column: "To be taken" becomes "N/A".
pub fn resolve_grade(grade: &str) -> String {
    if grade == NOT_TAKEN_GRADE {
        "N/A".to_string()
    } else {
        grade.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_in_progress_is_overridden() {
        assert_eq!(resolve_status(StatusTag::Unknown, "In Progress"), StatusTag::InProgress);
    }

    #[test]
    fn unknown_prereq_text_is_overridden() {
        assert_eq!(
            resolve_status(StatusTag::Unknown, "Pre Requisite not cleared"),
            StatusTag::PrerequisitesNotCleared
        );
    }

    #[test]
    fn override_requires_unknown_status() {
        assert_eq!(resolve_status(StatusTag::Locked, "In Progress"), StatusTag::Locked);
        assert_eq!(resolve_status(StatusTag::Available, "Pre Requisite not cleared"), StatusTag::Available);
    }

    #[test]
    fn override_list_is_exact() {
        assert_eq!(resolve_status(StatusTag::Unknown, "in progress"), StatusTag::Unknown);
        assert_eq!(resolve_status(StatusTag::Unknown, "In Progress "), StatusTag::Unknown);
        assert_eq!(resolve_status(StatusTag::Unknown, "Dr. Smith"), StatusTag::Unknown);
    }

    #[test]
    fn grade_to_be_taken_becomes_na() {
        assert_eq!(resolve_grade("To be taken"), "N/A");
        assert_eq!(resolve_grade("A-"), "A-");
        assert_eq!(resolve_grade(""), "");
    }

    #[test]
    fn badge_table_matches_tags() {
        assert_eq!(StatusTag::Cleared.badge().class, "status-cleared");
        assert_eq!(StatusTag::Unknown.badge().label, "Unknown");
        assert_eq!(StatusTag::PrerequisitesNotCleared.badge().class, "status-not-cleared");
        for tag in StatusTag::ALL {
            assert!(tag.badge().class.starts_with("status-"));
        }
    }

    #[test]
    fn serialises_to_wire_names() {
        let json = serde_json::to_string(&StatusTag::NotOffered).unwrap();
        assert_eq!(json, "\"not offered\"");
        let parsed: StatusTag = serde_json::from_str("\"in progress\"").unwrap();
        assert_eq!(parsed, StatusTag::InProgress);
        for tag in StatusTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }
}
