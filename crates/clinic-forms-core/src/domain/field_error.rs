//! Field-level validation failure.
//!
//! A [`FieldError`] pairs a stable [`ErrorKind`] tag with the sentence shown
//! next to the form field. Callers branch on the kind; the message is for
//! display only.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// What kind of rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Mandatory value absent or blank.
    Required,
    /// Value present but fails a format rule.
    InvalidShape,
    /// Numeric value outside its allowed range.
    OutOfRange,
    /// Text shorter than the minimum length.
    TooShort,
    /// Text longer than the maximum length.
    TooLong,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidShape => "invalid_shape",
            Self::OutOfRange => "out_of_range",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field's validation failure.
///
/// Displays (and serializes) as its message alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The uniform "`<label>` is required" error.
    pub fn required(label: &str) -> Self {
        Self::new(ErrorKind::Required, format!("{label} is required"))
    }

    pub fn invalid_shape(message: &'static str) -> Self {
        Self::new(ErrorKind::InvalidShape, message)
    }

    pub fn out_of_range(message: &'static str) -> Self {
        Self::new(ErrorKind::OutOfRange, message)
    }

    pub fn too_short(message: &'static str) -> Self {
        Self::new(ErrorKind::TooShort, message)
    }

    pub fn too_long(message: &'static str) -> Self {
        Self::new(ErrorKind::TooLong, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_embeds_label() {
        let err = FieldError::required("Assigned doctor");
        assert_eq!(err.kind(), ErrorKind::Required);
        assert_eq!(err.to_string(), "Assigned doctor is required");
    }

    #[test]
    fn serializes_as_bare_message() {
        let err = FieldError::too_long("Bio must be at most 500 characters");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            "\"Bio must be at most 500 characters\""
        );
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ErrorKind::InvalidShape.to_string(), "invalid_shape");
        assert_eq!(
            serde_json::to_string(&ErrorKind::OutOfRange).unwrap(),
            "\"out_of_range\""
        );
    }
}
