//! Caller-supplied form input.
//!
//! [`FormValues`] is a flat record of field name to raw input, read-only to
//! the validators. Absent and `null` fields are both treated as missing.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One raw form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// The text form validators see. `Null` has none.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Integer(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Flat mapping of field name to raw input for one entity's form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(IndexMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Text form of a field, `None` when absent or null.
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.0.get(field).and_then(FieldValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl TryFrom<serde_json::Value> for FormValues {
    type Error = DomainError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(DomainError::InvalidFormValues(
                "expected an object of field values".into(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DomainError::InvalidFormValues(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_render_as_decimal_text() {
        let values = FormValues::new().with("age", 42).with("weight", 61.5);
        assert_eq!(values.text("age").as_deref(), Some("42"));
        assert_eq!(values.text("weight").as_deref(), Some("61.5"));
    }

    #[test]
    fn null_and_absent_are_both_missing() {
        let values = FormValues::new().with("email", None::<&str>);
        assert_eq!(values.text("email"), None);
        assert_eq!(values.text("phone"), None);
        assert!(values.get("email").is_some_and(FieldValue::is_null));
    }

    #[test]
    fn deserializes_mixed_json_object() {
        let values = FormValues::try_from(json!({
            "name": "Asha",
            "age": 30,
            "email": null,
            "consent": true
        }))
        .unwrap();

        assert_eq!(values.get("age"), Some(&FieldValue::Integer(30)));
        assert_eq!(values.get("email"), Some(&FieldValue::Null));
        assert_eq!(values.text("consent").as_deref(), Some("true"));
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn rejects_non_object_json() {
        let err = FormValues::try_from(json!(["name"])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidFormValues(_)));
    }

    #[test]
    fn rejects_nested_values() {
        let err = FormValues::try_from(json!({ "address": { "city": "Pune" } })).unwrap_err();
        assert!(matches!(err, DomainError::InvalidFormValues(_)));
    }
}
