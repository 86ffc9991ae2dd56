//! Student profile fields read from the portal's GPA summary table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keys taken from the first two cells of a summary row.
const PROFILE_KEYS: [&str; 6] = [
    "Name",
    "Reg. Number",
    "Program",
    "Credit Hours Completed",
    "Credit Hours Required",
    "Credit Hours Remaining",
];

/// Recognised profile fields, keyed by their label on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentInfo(BTreeMap<String, String>);

/// `"Reg. Number :"` → `"Reg. Number"`.
fn normalize_key(cell: &str) -> String {
    cell.replacen(':', "", 1).trim().to_string()
}

impl StudentInfo {
    /// Extract profile fields from the summary table's rows of cell texts.
    ///
    /// A four-cell row can carry a second credit-hours pair in cells 2 and 3.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut fields = BTreeMap::new();
        for cells in rows {
            let [first, second, rest @ ..] = cells.as_slice() else {
                continue;
            };
            let key = normalize_key(first);
            if PROFILE_KEYS.contains(&key.as_str()) {
                fields.insert(key, second.trim().to_string());
            }
            if let [third, fourth] = rest
                && third.contains("Credit Hours")
            {
                fields.insert(normalize_key(third), fourth.trim().to_string());
            }
        }
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(json: &str) -> Vec<Vec<String>> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn profile_rows() {
        let info = StudentInfo::from_rows(&rows(
            r#"[
                ["Name:", " Ada Lovelace "],
                ["Reg. Number :", "FA21-BCS-001"],
                ["Program", "BS Computer Science"],
                ["CGPA", "3.9"],
                ["Credit Hours Completed:", "96", "Credit Hours Required:", "133"],
                ["Only one cell"]
            ]"#,
        ));
        assert_eq!(info.get("Name"), Some("Ada Lovelace"));
        assert_eq!(info.get("Reg. Number"), Some("FA21-BCS-001"));
        assert_eq!(info.get("Program"), Some("BS Computer Science"));
        assert_eq!(info.get("Credit Hours Completed"), Some("96"));
        assert_eq!(info.get("Credit Hours Required"), Some("133"));
        assert_eq!(info.get("CGPA"), None);
        assert_eq!(info.iter().count(), 5);
    }

    #[test]
    fn four_cell_row_needs_credit_hours_label() {
        let info = StudentInfo::from_rows(&rows(r#"[["Name", "Ada", "Section", "A"]]"#));
        assert_eq!(info.get("Name"), Some("Ada"));
        assert_eq!(info.get("Section"), None);
    }

    #[test]
    fn serialises_as_object() {
        let info = StudentInfo::from_rows(&rows(r#"[["Program", "BSCS"]]"#));
        assert_eq!(serde_json::to_string(&info).unwrap(), r#"{"Program":"BSCS"}"#);
        let back: StudentInfo = serde_json::from_str(r#"{"Program":"BSCS"}"#).unwrap();
        assert_eq!(back, info);
    }
}
