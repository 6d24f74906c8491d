//! Application layer errors.
//!
//! These errors represent failures in orchestration, not individual field
//! rules. Field failures are values inside an [`ErrorMap`].

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{Entity, ErrorMap};
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The form failed validation and was not handed to the gateway.
    #[error("{entity} form rejected: {}", rejection_summary(.errors))]
    FormRejected { entity: Entity, errors: ErrorMap },

    /// The gateway could not accept the submission.
    #[error("Submission gateway failed: {reason}")]
    GatewayFailed { reason: String },

    /// Gateway state access failed (lock poisoned).
    #[error("Submission gateway is unavailable")]
    GatewayLockError,

    /// A form file could not be read or parsed.
    #[error("Could not load form from {path}: {reason}")]
    FormLoad { path: PathBuf, reason: String },

    /// A form file has an extension no loader handles.
    #[error("Unsupported form format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

fn rejection_summary(errors: &ErrorMap) -> String {
    match (errors.first_error(), errors.error_count()) {
        (Some(first), 1) => first.to_string(),
        (Some(first), n) => format!("{first} (and {} more)", n - 1),
        (None, _) => "no field errors".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FormRejected { errors, .. } => errors
                .errors()
                .map(|(field, error)| format!("{field}: {error}"))
                .collect(),
            Self::GatewayFailed { reason } => vec![
                format!("Gateway failure: {}", reason),
                "Check that the outbox directory is writable".into(),
                "The form itself was valid; try submitting again".into(),
            ],
            Self::GatewayLockError => vec![
                "The submission gateway is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::FormLoad { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Form files must hold a flat JSON object or TOML table".into(),
            ],
            Self::UnsupportedFormat { .. } => {
                vec!["Use a .json or .toml file, or pipe JSON on stdin".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FormRejected { .. } => ErrorCategory::Validation,
            Self::GatewayFailed { .. } | Self::GatewayLockError => ErrorCategory::Internal,
            Self::FormLoad { .. } | Self::UnsupportedFormat { .. } => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldError;

    #[test]
    fn rejection_message_mentions_first_error_and_count() {
        let mut errors = ErrorMap::new();
        errors.set("name", None);
        errors.set("phone", Some(FieldError::required("Phone number")));
        errors.set("email", Some(FieldError::invalid_shape("Please enter a valid email address")));

        let err = ApplicationError::FormRejected {
            entity: Entity::Receptionist,
            errors,
        };
        assert_eq!(
            err.to_string(),
            "receptionist form rejected: Phone number is required (and 1 more)"
        );
        assert_eq!(
            err.suggestions(),
            vec![
                "phone: Phone number is required".to_string(),
                "email: Please enter a valid email address".to_string(),
            ]
        );
    }
}
