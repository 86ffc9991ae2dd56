//! The page contents handed over by the scraper, as JSON.
//!
//! ```json
//! { "studentInfo": [["Name:", "Ada"]],
//!   "sections": [ { "header": "Semester 1",
//!                   "rows": [ { "cells": ["", "CS101", ...],
//!                               "markers": [ {"kind": "checkbox", "id": "c1", "checked": true} ] } ] } ] }
//! ```
//!
//! Shape is checked before deserialising so a wrong shape fails with the
//! offending path instead of a generic serde message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::row::ScrapedRow;

/// One semester table: its header text and its rows, header row included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub rows: Vec<ScrapedRow>,
}

impl Section {
    /// Rows below the table's own header row.
    pub fn body(&self) -> &[ScrapedRow] {
        self.rows.get(1..).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeDump {
    #[serde(default)]
    pub student_info: Vec<Vec<String>>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ScrapeDump {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        check_dump(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Every body row with the header of the section it sits in.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &ScrapedRow)> {
        self.sections
            .iter()
            .flat_map(|s| s.body().iter().map(move |row| (s.header.as_str(), row)))
    }

    /// Input ids of checked checkboxes, in page order.
    pub fn checked_ids(&self) -> Vec<String> {
        self.rows()
            .filter(|(_, row)| row.is_checked())
            .filter_map(|(_, row)| row.input_id().map(str::to_string))
            .collect()
    }
}

/// Parse a bare list of rows. Anything but an array is rejected.
pub fn rows_from_value(value: &Value) -> Result<Vec<ScrapedRow>, CoreError> {
    if !value.is_array() {
        return Err(CoreError::shape("rows", "array", value));
    }
    Ok(Vec::<ScrapedRow>::deserialize(value)?)
}

fn check_dump(value: &Value) -> Result<(), CoreError> {
    let Some(top) = value.as_object() else {
        return Err(CoreError::shape("$", "object", value));
    };
    if let Some(info) = top.get("studentInfo")
        && !info.is_array()
    {
        return Err(CoreError::shape("studentInfo", "array", info));
    }
    let Some(sections) = top.get("sections") else {
        return Ok(());
    };
    let Some(sections) = sections.as_array() else {
        return Err(CoreError::shape("sections", "array", sections));
    };
    for (i, section) in sections.iter().enumerate() {
        let Some(section) = section.as_object() else {
            return Err(CoreError::shape(format!("sections[{i}]"), "object", section));
        };
        if let Some(rows) = section.get("rows")
            && !rows.is_array()
        {
            return Err(CoreError::shape(format!("sections[{i}].rows"), "array", rows));
        }
    }
    Ok(())
}
