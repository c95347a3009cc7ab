use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::FieldValue;

/// Data entered by the user across the steps of one wizard.
///
/// The accumulator is an immutable value: every update goes through
/// [`FormAccumulator::merge`], which returns a new accumulator and leaves the
/// receiver untouched. The same type doubles as the *partial* update a step
/// submits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormAccumulator {
    fields: BTreeMap<String, FieldValue>,
}

impl FormAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used to assemble a partial update.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Returns `true` only when `key` holds `Bool(true)`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(FieldValue::as_bool).unwrap_or(false)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    pub fn object(&self, key: &str) -> Option<&BTreeMap<String, FieldValue>> {
        self.get(key).and_then(FieldValue::as_object)
    }

    /// Reads a text attribute of a nested object, e.g. `profile.email`.
    pub fn nested_text(&self, key: &str, attribute: &str) -> Option<&str> {
        self.object(key)
            .and_then(|map| map.get(attribute))
            .and_then(FieldValue::as_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Shallow merge: every top-level key of `partial` overwrites the same
    /// key here, nested objects included. Keys absent from `partial` survive.
    pub fn merge(&self, partial: &FormAccumulator) -> FormAccumulator {
        let mut fields = self.fields.clone();
        for (key, value) in &partial.fields {
            fields.insert(key.clone(), value.clone());
        }
        FormAccumulator { fields }
    }

    /// Copy of this accumulator with `keys` removed.
    pub fn without<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> FormAccumulator {
        let mut fields = self.fields.clone();
        for key in keys {
            fields.remove(key);
        }
        FormAccumulator { fields }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormAccumulator {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Free-function form of [`FormAccumulator::merge`].
pub fn merge(base: &FormAccumulator, partial: &FormAccumulator) -> FormAccumulator {
    base.merge(partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FormAccumulator {
        FormAccumulator::new()
            .with("phone", "9876543210")
            .with("phone_verified", true)
            .with(
                "profile",
                FieldValue::object([("full_name", "Rahul"), ("email", "rahul@example.com")]),
            )
    }

    #[test]
    fn merge_overwrites_and_preserves_unspecified_keys() {
        let partial = FormAccumulator::new().with("phone", "9123456789");
        let merged = merge(&base(), &partial);

        assert_eq!(merged.text("phone"), Some("9123456789"));
        assert!(merged.flag("phone_verified"));
        assert_eq!(merged.nested_text("profile", "full_name"), Some("Rahul"));
    }

    #[test]
    fn merge_does_not_mutate_base() {
        let original = base();
        let snapshot = original.clone();
        let _ = original.merge(&FormAccumulator::new().with("otp", "123456"));
        assert_eq!(original, snapshot);
    }

    #[test]
    fn merge_with_empty_partial_is_identity() {
        let original = base();
        assert_eq!(original.merge(&FormAccumulator::new()), original);
    }

    #[test]
    fn nested_objects_are_replaced_wholesale() {
        let partial = FormAccumulator::new().with(
            "profile",
            FieldValue::object([("address", "123 Main Street")]),
        );
        let merged = base().merge(&partial);

        assert_eq!(
            merged.nested_text("profile", "address"),
            Some("123 Main Street")
        );
        assert_eq!(merged.nested_text("profile", "full_name"), None);
    }

    #[test]
    fn merge_is_associative() {
        let a = base();
        let b = FormAccumulator::new().with("otp", "000000").with("x", 1u64);
        let c = FormAccumulator::new().with("otp", "123456").with("y", false);

        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn without_drops_only_named_keys() {
        let original = base();
        let trimmed = original.without(["phone_verified", "absent"]);

        assert!(!trimmed.contains("phone_verified"));
        assert_eq!(trimmed.text("phone"), Some("9876543210"));
        assert!(original.flag("phone_verified"));
    }

    #[test]
    fn flag_is_false_for_missing_or_non_bool() {
        let acc = FormAccumulator::new().with("verified", "yes");
        assert!(!acc.flag("verified"));
        assert!(!acc.flag("missing"));
    }

    #[test]
    fn serializes_as_flat_json_object() {
        let json = base().to_json();
        assert_eq!(json["phone"], "9876543210");
        assert_eq!(json["profile"]["email"], "rahul@example.com");
    }
}
