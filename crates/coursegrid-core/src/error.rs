use thiserror::Error;

/// Failures of the normalisation pipeline.
///
/// Malformed *content* (odd cells, bad timings, empty codes) never lands here;
/// it degrades to defaults. Only input of the wrong shape is rejected.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input shape at {path}: expected {expected}, found {found}")]
    InvalidShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn shape(path: impl Into<String>, expected: &'static str, value: &serde_json::Value) -> Self {
        Self::InvalidShape {
            path: path.into(),
            expected,
            found: json_kind(value),
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
