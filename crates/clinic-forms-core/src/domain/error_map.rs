//! Field → error map and the helpers callers gate submission on.
//!
//! The map preserves insertion order, so "first error" means the first
//! failing field in the order the entity validator checked them.

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::field_error::FieldError;

/// Ordered mapping of field name to `Option<FieldError>` (`None` = valid).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, Option<FieldError>>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Insert or overwrite one field's result. New keys go last; existing
    /// keys keep their position.
    pub fn set(&mut self, field: impl Into<String>, error: Option<FieldError>) {
        self.0.insert(field.into(), error);
    }

    /// Overwrite entries from `other`, key by key.
    pub fn merge(&mut self, other: ErrorMap) {
        for (field, error) in other.0 {
            self.0.insert(field, error);
        }
    }

    /// The field's entry: `None` if the field was not checked.
    pub fn get(&self, field: &str) -> Option<&Option<FieldError>> {
        self.0.get(field)
    }

    /// The field's error, if it was checked and failed.
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field).and_then(Option::as_ref)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldError>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Failing entries only, in order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|e| (k.as_str(), e)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True iff any entry holds an error.
    pub fn has_errors(&self) -> bool {
        self.0.values().any(Option::is_some)
    }

    /// First error in insertion order.
    pub fn first_error(&self) -> Option<&FieldError> {
        self.0.values().find_map(Option::as_ref)
    }

    /// Same keys, same order, every entry cleared.
    pub fn cleared(&self) -> ErrorMap {
        Self(self.0.keys().map(|k| (k.clone(), None)).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Option<FieldError>)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<FieldError>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// True iff at least one field failed. The sole gate before submission.
pub fn has_form_errors(errors: &ErrorMap) -> bool {
    errors.has_errors()
}

/// First failing field's error in insertion order, if any.
pub fn get_first_error(errors: &ErrorMap) -> Option<&FieldError> {
    errors.first_error()
}

/// A new map with the same keys, all valid. The input is untouched.
pub fn clear_form_errors(errors: &ErrorMap) -> ErrorMap {
    errors.cleared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field_error::ErrorKind;

    fn err(message: &'static str) -> Option<FieldError> {
        Some(FieldError::new(ErrorKind::InvalidShape, message))
    }

    fn sample() -> ErrorMap {
        [("a", None), ("b", err("err1")), ("c", err("err2"))]
            .into_iter()
            .collect()
    }

    #[test]
    fn empty_map_has_no_errors() {
        assert!(!has_form_errors(&ErrorMap::new()));
        assert_eq!(get_first_error(&ErrorMap::new()), None);
    }

    #[test]
    fn has_errors_iff_any_entry_is_some() {
        let all_valid: ErrorMap = [("a", None), ("b", None)].into_iter().collect();
        assert!(!has_form_errors(&all_valid));
        assert!(has_form_errors(&sample()));
    }

    #[test]
    fn first_error_follows_insertion_order() {
        assert_eq!(
            get_first_error(&sample()).map(FieldError::message),
            Some("err1")
        );

        let reversed: ErrorMap = [("c", err("err2")), ("b", err("err1"))]
            .into_iter()
            .collect();
        assert_eq!(
            get_first_error(&reversed).map(FieldError::message),
            Some("err2")
        );
    }

    #[test]
    fn clear_keeps_keys_and_is_idempotent() {
        let input: ErrorMap = [("a", err("x")), ("b", None)].into_iter().collect();
        let cleared = clear_form_errors(&input);

        let expected: ErrorMap = [("a", None), ("b", None)].into_iter().collect();
        assert_eq!(cleared, expected);
        assert_eq!(clear_form_errors(&cleared), cleared);
        // input untouched
        assert_eq!(input.error("a").map(FieldError::message), Some("x"));
    }

    #[test]
    fn merge_overwrites_in_place_and_appends_new_keys() {
        let mut errors = sample();
        let update: ErrorMap = [("b", None), ("d", err("err3"))].into_iter().collect();
        errors.merge(update);

        assert_eq!(errors.keys().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
        assert_eq!(errors.error("b"), None);
        assert_eq!(errors.error_count(), 2);
        assert_eq!(errors.first_error().map(FieldError::message), Some("err2"));
    }

    #[test]
    fn get_distinguishes_unchecked_from_valid() {
        let errors = sample();
        assert_eq!(errors.get("a"), Some(&None));
        assert_eq!(errors.get("z"), None);
        assert!(errors.contains_key("a"));
        assert!(!errors.contains_key("z"));
    }

    #[test]
    fn serializes_in_order_with_nulls() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"a":null,"b":"err1","c":"err2"}"#);
    }
}
