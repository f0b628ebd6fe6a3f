//! # Claim Set
//!
//! A decoded, already-verified token payload, viewed as a loosely-typed tree
//! of JSON values.
//!
//! Readers of nested claims go through two total accessors:
//! - [`as_mapping`]: the value must be an object
//! - [`as_string_list`]: the value must be an array of strings
//!
//! Both return a [`ClaimShapeError`] on wrong structure. Absence is handled by
//! the caller via `Option` before these are reached, so the two cases never
//! blur together. JSON `null` counts as absent everywhere.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::claims::ClaimShapeError;

/// Registered claim name of the token subject.
pub const SUBJECT: &str = "sub";

/// Immutable view over the claims of one verified token.
///
/// # Example
/// ```
/// use kc_guard::claims::ClaimSet;
/// use serde_json::json;
///
/// let claims = ClaimSet::try_from(json!({ "sub": "uuid-123", "nickname": null })).unwrap();
///
/// assert_eq!(claims.get_as_string("sub").as_deref(), Some("uuid-123"));
/// assert!(claims.get("nickname").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Returns the claim value, treating JSON `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the claim rendered as a string.
    ///
    /// Strings are returned as-is; any other non-null value is rendered as
    /// compact JSON text (`42`, `false`, `["a"]`).
    pub fn get_as_string(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The registered `sub` claim.
    pub fn subject(&self) -> Option<String> {
        self.get_as_string(SUBJECT)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for ClaimSet {
    type Error = ClaimShapeError;

    /// Accepts only a JSON object; a token payload is always one.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ClaimShapeError::new("$", "an object", &other)),
        }
    }
}

/// Views `value` as a claim object.
pub fn as_mapping<'a>(
    path: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, ClaimShapeError> {
    value
        .as_object()
        .ok_or_else(|| ClaimShapeError::new(path, "an object", value))
}

/// Views `value` as a list of strings.
///
/// A single non-string element makes the whole list malformed.
pub fn as_string_list<'a>(path: &str, value: &'a Value) -> Result<Vec<&'a str>, ClaimShapeError> {
    let items = value
        .as_array()
        .ok_or_else(|| ClaimShapeError::new(path, "an array of strings", value))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| ClaimShapeError::new(path, "an array of strings", item))
        })
        .collect()
}

/// Looks up `key` inside an already-resolved claim object, `null` as absent.
pub(crate) fn member<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}
