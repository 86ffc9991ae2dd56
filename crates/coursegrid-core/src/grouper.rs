//! Grouping of parsed rows into courses and semesters.
//!
//! The portal lists one row per offered section, so a course with three
//! sections appears three times. Rows sharing a course code fold into one
//! [`CourseRecord`]; the first row is the reference for course-level fields
//! and every row becomes a [`Slot`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::model::{CourseRecord, Semester, Slot, SlotId};
use crate::row::RawCourseRow;
use crate::semester::{compare_semesters, sort_by_semester};
use crate::status::{resolve_grade, resolve_status};

/// Prerequisite sentinel for courses without prerequisites.
pub const NO_PREREQUISITES: &str = "None";

/// A grouped course together with the semester its main row came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedCourse {
    pub semester: String,
    pub course: CourseRecord,
}

/// Split the prerequisite column into one entry per line.
///
/// Empty text and the portal's `"-"` mean no prerequisites.
pub fn parse_prerequisites(text: &str) -> Vec<String> {
    if text.is_empty() || text == "-" {
        return vec![NO_PREREQUISITES.to_string()];
    }
    text.split('\n').map(str::to_string).collect()
}

/// Group rows by course code, keeping first-seen order of codes.
pub fn group_rows(rows: Vec<RawCourseRow>) -> Vec<GroupedCourse> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RawCourseRow>> = HashMap::new();

    for row in rows {
        if row.course_code.is_empty() {
            warn!(semester = %row.semester, name = %row.course_name, "row has an empty course code");
        }
        if !groups.contains_key(&row.course_code) {
            order.push(row.course_code.clone());
        }
        groups.entry(row.course_code.clone()).or_default().push(row);
    }

    let mut courses: Vec<GroupedCourse> = order
        .into_iter()
        .filter_map(|code| groups.remove(&code))
        .map(build_course)
        .collect();
    assign_slot_ids(&mut courses);
    courses
}

fn build_course(group: Vec<RawCourseRow>) -> GroupedCourse {
    let main = &group[0];
    let status = resolve_status(main.status, &main.faculty_name);

    let slots = group
        .iter()
        .enumerate()
        .map(|(i, row)| Slot {
            slot_id: SlotId::Position(i as u32 + 1),
            input_id: row.input_id.clone(),
            timings: row.timings.clone(),
            faculty_name: row.faculty_name.clone(),
            status: row.status,
        })
        .collect::<Vec<_>>();

    debug!(code = %main.course_code, slots = slots.len(), "grouped course");

    GroupedCourse {
        semester: main.semester.clone(),
        course: CourseRecord {
            course_code: main.course_code.clone(),
            name: main.course_name.clone(),
            status,
            pre_requisites: parse_prerequisites(&main.pre_requisite),
            credits: main.credits,
            slots,
            grade: resolve_grade(&main.grade),
        },
    }
}

/// Assign slot ids in display order (semester order, then first-seen course
/// order), so which course keeps a duplicated input id does not depend on
/// the order the page listed its sections in.
fn assign_slot_ids(courses: &mut [GroupedCourse]) {
    let mut display_order: Vec<usize> = (0..courses.len()).collect();
    display_order.sort_by(|&a, &b| compare_semesters(&courses[a].semester, &courses[b].semester));

    let mut seen_ids: HashSet<String> = HashSet::new();
    for i in display_order {
        assign_course_slot_ids(&mut courses[i].course, &mut seen_ids);
    }
}

/// Reuse each slot's input id while it is still globally unseen; number the
/// rest by position, skipping numbers whose text is an input id of the course.
fn assign_course_slot_ids(course: &mut CourseRecord, seen_ids: &mut HashSet<String>) {
    let reserved: HashSet<String> = course.slots.iter().filter_map(|s| s.input_id.clone()).collect();
    let kept: Vec<Option<SlotId>> = course
        .slots
        .iter()
        .map(|slot| match &slot.input_id {
            Some(id) if seen_ids.insert(id.clone()) => Some(SlotId::Input(id.clone())),
            Some(id) => {
                warn!(code = %course.course_code, input_id = %id, "duplicate input id, numbering slot by position");
                None
            }
            None => None,
        })
        .collect();

    let mut taken: HashSet<u32> = HashSet::new();
    for (i, (slot, id)) in course.slots.iter_mut().zip(kept).enumerate() {
        slot.slot_id = match id {
            Some(id) => id,
            None => {
                let mut n = i as u32 + 1;
                while taken.contains(&n) || reserved.contains(&n.to_string()) {
                    n += 1;
                }
                taken.insert(n);
                SlotId::Position(n)
            }
        };
    }
}

/// Bucket grouped courses by semester label and sort the buckets for display.
pub fn into_semesters(courses: Vec<GroupedCourse>) -> Vec<Semester> {
    let mut semesters: Vec<Semester> = Vec::new();
    for GroupedCourse { semester, course } in courses {
        match semesters.iter_mut().find(|s| s.label == semester) {
            Some(bucket) => bucket.courses.push(course),
            None => semesters.push(Semester {
                label: semester,
                courses: vec![course],
            }),
        }
    }
    sort_by_semester(&mut semesters, |s| s.label.as_str());
    semesters
}

/// Expand semesters back into one row per slot, the inverse of grouping.
pub fn expand_rows(semesters: &[Semester]) -> Vec<RawCourseRow> {
    semesters
        .iter()
        .flat_map(|semester| {
            semester.courses.iter().flat_map(move |course| {
                let pre_requisite = if course.has_prerequisites() {
                    course.pre_requisites.join("\n")
                } else {
                    String::new()
                };
                course.slots.iter().map(move |slot| RawCourseRow {
                    semester: semester.label.clone(),
                    status: slot.status,
                    input_id: slot.input_id.clone(),
                    course_code: course.course_code.clone(),
                    pre_requisite: pre_requisite.clone(),
                    credits: course.credits,
                    course_name: course.name.clone(),
                    grade: course.grade.clone(),
                    faculty_name: slot.faculty_name.clone(),
                    timings: slot.timings.clone(),
                })
            })
        })
        .collect()
}
