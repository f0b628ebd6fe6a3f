use serde_json::Value;
use thiserror::Error;

/// A claim was present but did not have the shape the reader expected.
///
/// Absence is never reported through this type: a missing claim is simply
/// `None`. This error only covers *wrong* structure, such as a
/// `resource_access` claim that is a string instead of an object.
///
/// # Example
/// ```
/// use kc_guard::error::claims::ClaimShapeError;
/// use serde_json::json;
///
/// let err = ClaimShapeError::new("resource_access", "an object", &json!("oops"));
/// assert_eq!(
///     err.to_string(),
///     "claim `resource_access` must be an object, found a string"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("claim `{path}` must be {expected}, found {found}")]
pub struct ClaimShapeError {
    /// Dotted path of the offending claim (e.g. `resource_access.my-app.roles`)
    pub path: String,
    /// Human-readable description of the expected shape
    pub expected: &'static str,
    /// Human-readable description of what was actually there
    pub found: &'static str,
}

impl ClaimShapeError {
    pub fn new(path: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self {
            path: path.into(),
            expected,
            found: describe(found),
        }
    }
}

/// Names the JSON variant of a value, for diagnostics.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
