//! Normalisation of a university registration portal's course tables into a
//! canonical semester/course/slot model, plus the selection, conflict and
//! calendar logic the front ends build on.

pub mod calendar;
pub mod catalog;
pub mod conflict;
pub mod dump;
pub mod error;
pub mod grouper;
pub mod model;
pub mod row;
pub mod selection;
pub mod semester;
pub mod snapshot;
pub mod status;
pub mod student;
pub mod timing;

pub use calendar::{CalendarLayout, CalendarWindow, ChosenSlot, agenda, layout};
pub use catalog::{Catalog, CourseStanding};
pub use conflict::conflicts;
pub use dump::ScrapeDump;
pub use error::CoreError;
pub use model::{CourseRecord, Semester, Slot, SlotId};
pub use selection::{SelectOutcome, SelectionError, SelectionSet};
pub use snapshot::{Snapshot, normalize};
pub use status::StatusTag;
pub use student::StudentInfo;
pub use timing::Timing;
