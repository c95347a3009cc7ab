use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single form field value.
///
/// Nested objects group the attributes of one logical entity (for example
/// the `profile` of a user) and are replaced wholesale on merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Builds an object value from `(key, value)` pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Exact up to 2^53; larger values are rounded to the nearest `f64`.
impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(value: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Object(value)
    }
}
