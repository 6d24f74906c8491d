// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Field validation failures are not domain errors: they are returned as
/// values inside an [`crate::domain::ErrorMap`]. These variants describe
/// requests the domain cannot interpret at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown form entity '{0}'")]
    UnknownEntity(String),

    #[error("The {entity} form has no field '{field}'")]
    UnknownField { entity: String, field: String },

    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid form values: {0}")]
    InvalidFormValues(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownEntity(name) => vec![
                format!("'{}' is not a known form", name),
                "Known forms: patient, doctor, receptionist, center, lab-staff".into(),
            ],
            Self::UnknownField { entity, .. } => vec![
                format!("List the fields checked on the {} form:", entity),
                format!("  clinic-forms fields {}", entity),
            ],
            Self::InvalidFormValues(msg) => vec![
                "Form values must be a flat object of field name to text or number".into(),
                format!("Details: {}", msg),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownEntity(_) | Self::UnknownField { .. } => ErrorCategory::NotFound,
            Self::InvalidFormValues(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
