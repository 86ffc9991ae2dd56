//! A student's in-progress choice of at most one slot per course.
//!
//! The set is owned by the caller's session and only changes through the
//! methods here; the normalisation pipeline never touches it.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::calendar::ChosenSlot;
use crate::catalog::Catalog;
use crate::conflict::conflicts;
use crate::model::{Semester, Slot, SlotId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown course: {0}")]
    UnknownCourse(String),

    #[error("course {code} has no slot {slot}")]
    UnknownSlot { code: String, slot: String },

    #[error("slot {slot} of {code} is not available")]
    SlotUnavailable { code: String, slot: SlotId },

    #[error("slot {slot} of {code} clashes with {}", .with.join(", "))]
    Clash {
        code: String,
        slot: SlotId,
        with: Vec<String>,
    },
}

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Replaced { previous: SlotId },
    Deselected,
}

/// One course's chosen slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSlot {
    pub course_code: String,
    pub course_name: String,
    pub slot: Slot,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    entries: Vec<SelectedSlot>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chosen slots in the order courses were first selected.
    pub fn entries(&self) -> &[SelectedSlot] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&SelectedSlot> {
        self.entries.iter().find(|e| e.course_code == code)
    }

    pub fn is_selected(&self, code: &str, slot_id: &SlotId) -> bool {
        self.get(code).is_some_and(|e| &e.slot.slot_id == slot_id)
    }

    /// Toggle a slot: choosing the course's current slot again removes it,
    /// any other slot replaces the course's entry in place.
    pub fn select(&mut self, code: &str, name: &str, slot: &Slot) -> SelectOutcome {
        match self.entries.iter().position(|e| e.course_code == code) {
            Some(i) if self.entries[i].slot.slot_id == slot.slot_id => {
                self.entries.remove(i);
                SelectOutcome::Deselected
            }
            Some(i) => {
                let previous = std::mem::replace(&mut self.entries[i].slot, slot.clone());
                SelectOutcome::Replaced {
                    previous: previous.slot_id,
                }
            }
            None => {
                self.entries.push(SelectedSlot {
                    course_code: code.to_string(),
                    course_name: name.to_string(),
                    slot: slot.clone(),
                });
                SelectOutcome::Selected
            }
        }
    }

    pub fn deselect(&mut self, code: &str) -> Option<SelectedSlot> {
        let i = self.entries.iter().position(|e| e.course_code == code)?;
        Some(self.entries.remove(i))
    }

    /// Codes of the other selected courses whose slot overlaps `slot`.
    pub fn clashes(&self, code: &str, slot: &Slot) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.course_code != code && conflicts(&e.slot, slot))
            .map(|e| e.course_code.clone())
            .collect()
    }

    pub fn is_selectable(&self, code: &str, slot: &Slot) -> bool {
        slot.is_available() && self.clashes(code, slot).is_empty()
    }

    /// Like [`select`](Self::select), but refuses unavailable or clashing
    /// slots. Deselecting the current slot is always allowed.
    pub fn try_select(&mut self, code: &str, name: &str, slot: &Slot) -> Result<SelectOutcome, SelectionError> {
        if !self.is_selected(code, &slot.slot_id) {
            if !slot.is_available() {
                return Err(SelectionError::SlotUnavailable {
                    code: code.to_string(),
                    slot: slot.slot_id.clone(),
                });
            }
            let with = self.clashes(code, slot);
            if !with.is_empty() {
                return Err(SelectionError::Clash {
                    code: code.to_string(),
                    slot: slot.slot_id.clone(),
                    with,
                });
            }
        }
        Ok(self.select(code, name, slot))
    }

    /// Guarded selection by course code and the textual slot id.
    pub fn choose(&mut self, catalog: &Catalog<'_>, code: &str, slot: &str) -> Result<SelectOutcome, SelectionError> {
        let course = catalog
            .get(code)
            .ok_or_else(|| SelectionError::UnknownCourse(code.to_string()))?;
        let found = course
            .slot_by_text(slot)
            .ok_or_else(|| SelectionError::UnknownSlot {
                code: code.to_string(),
                slot: slot.to_string(),
            })?;
        self.try_select(&course.course_code, &course.name, found)
    }

    /// Selection restored from the portal's checked inputs: per course, the
    /// first available slot whose input id was checked.
    pub fn preselect(semesters: &[Semester], checked_ids: &[String]) -> Self {
        let checked: HashSet<&str> = checked_ids.iter().map(String::as_str).collect();
        let mut set = Self::new();
        for course in semesters.iter().flat_map(|s| &s.courses) {
            if set.get(&course.course_code).is_some() {
                continue;
            }
            let slot = course.slots.iter().find(|s| {
                s.is_available() && s.input_id.as_deref().is_some_and(|id| checked.contains(id))
            });
            if let Some(slot) = slot {
                debug!(code = %course.course_code, slot = %slot.slot_id, "preselected");
                set.select(&course.course_code, &course.name, slot);
            }
        }
        set
    }

    /// Borrowed view for the calendar layout, in selection order.
    pub fn chosen(&self) -> Vec<ChosenSlot<'_>> {
        self.entries
            .iter()
            .map(|e| ChosenSlot {
                code: &e.course_code,
                name: &e.course_name,
                slot: &e.slot,
            })
            .collect()
    }
}
