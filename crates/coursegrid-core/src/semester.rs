//! Semester header normalisation and display ordering.
//!
//! The portal titles numbered semesters "Semester N ..." and files everything
//! else under assorted elective headers, which all collapse into one
//! "Depth Elective" bucket.

use std::cmp::Ordering;

pub const DEPTH_ELECTIVE: &str = "Depth Elective";

/// Canonical label for a section header.
///
/// Headers starting with "Semester" (any case) keep their trimmed text;
/// anything else becomes [`DEPTH_ELECTIVE`].
pub fn classify_semester(header: &str) -> String {
    let header = header.trim();
    let is_numbered = header
        .get(..8)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("semester"));
    if is_numbered {
        header.to_string()
    } else {
        DEPTH_ELECTIVE.to_string()
    }
}

/// First run of ASCII digits in the label, as a number.
fn leading_number(label: &str) -> Option<u64> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = label[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn is_depth_elective(label: &str) -> bool {
    label.to_lowercase().contains("depth elective")
}

/// Sort key realising the display order as a plain tuple comparison.
///
/// Bands, in order: labels without a digit run (lexicographic), numbered
/// labels (numeric, then lexicographic), depth electives (lexicographic).
/// A digitless label therefore sorts before every numbered one, so
/// "Semester Summer" comes before "Semester 1" even though the pairwise
/// rule would compare those two lexicographically; that pairwise rule is
/// not transitive and cannot be sorted by.
fn sort_key(label: &str) -> (u8, u64, &str) {
    if is_depth_elective(label) {
        return (2, 0, label);
    }
    match leading_number(label) {
        Some(n) => (1, n, label),
        None => (0, 0, label),
    }
}

/// Total order over semester labels.
pub fn compare_semesters(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sort anything carrying a semester label into display order (stable).
pub fn sort_by_semester<T>(items: &mut [T], label: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare_semesters(label(a), label(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["Semester 1", "Semester 10", "Semester 2", "Depth Elective", "Capstone"];

    #[test]
    fn numbered_header_is_kept() {
        assert_eq!(classify_semester("Semester 3 Core"), "Semester 3 Core");
        assert_eq!(classify_semester("  SEMESTER 4  "), "SEMESTER 4");
        assert_eq!(classify_semester("semester"), "semester");
    }

    #[test]
    fn other_headers_collapse() {
        assert_eq!(classify_semester("Humanities Electives"), DEPTH_ELECTIVE);
        assert_eq!(classify_semester(""), DEPTH_ELECTIVE);
        assert_eq!(classify_semester("Sem 1"), DEPTH_ELECTIVE);
        assert_eq!(classify_semester("The Semester 1"), DEPTH_ELECTIVE);
    }

    #[test]
    fn numeric_not_lexicographic() {
        let mut labels = vec!["Semester 10", "Semester 2", "Semester 1"];
        sort_by_semester(&mut labels, |s| *s);
        assert_eq!(labels, vec!["Semester 1", "Semester 2", "Semester 10"]);
    }

    #[test]
    fn depth_elective_sorts_last() {
        let mut labels = LABELS.to_vec();
        sort_by_semester(&mut labels, |s| *s);
        assert_eq!(
            labels,
            vec!["Capstone", "Semester 1", "Semester 2", "Semester 10", "Depth Elective"]
        );
        assert_eq!(compare_semesters("depth ELECTIVE 2", "Semester 99"), Ordering::Greater);
    }

    #[test]
    fn order_is_total() {
        for a in LABELS {
            assert_eq!(compare_semesters(a, a), Ordering::Equal);
            for b in LABELS {
                assert_eq!(compare_semesters(a, b), compare_semesters(b, a).reverse());
                for c in LABELS {
                    if compare_semesters(a, b) != Ordering::Greater
                        && compare_semesters(b, c) != Ordering::Greater
                    {
                        assert_ne!(compare_semesters(a, c), Ordering::Greater, "{a} <= {b} <= {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn equal_numbers_tie_break_on_label() {
        assert_eq!(compare_semesters("Semester 3 A", "Semester 3 B"), Ordering::Less);
    }

    #[test]
    fn digitless_labels_precede_numbered_ones() {
        assert_eq!(compare_semesters("Semester Summer", "Semester 1"), Ordering::Less);
        assert_eq!(compare_semesters("Semester 1", "Semester Summer"), Ordering::Greater);
    }

    #[test]
    fn first_digit_run_is_used() {
        assert_eq!(leading_number("Semester 12 (2024)"), Some(12));
        assert_eq!(leading_number("Capstone"), None);
        assert_eq!(leading_number("99999999999999999999999"), Some(u64::MAX));
    }
}
