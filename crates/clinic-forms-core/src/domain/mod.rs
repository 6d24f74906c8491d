//! Core domain layer for Clinic Forms.
//!
//! Pure validation logic. Nothing in here performs I/O, reads a clock, or
//! holds mutable state: the same [`FormValues`] always produce the same
//! [`ErrorMap`].
//!
//! - [`rules`]: field validators, one value in, `Option<FieldError>` out
//! - [`forms`]: entity validators built from a fixed set of field rules
//! - [`error_map`]: ordered field → error map plus the submission gate helpers

pub mod error;
pub mod error_map;
pub mod field_error;
pub mod form_values;
pub mod forms;
pub mod rules;
pub mod value_objects;

pub use error::{DomainError, ErrorCategory};
pub use error_map::{ErrorMap, clear_form_errors, get_first_error, has_form_errors};
pub use field_error::{ErrorKind, FieldError};
pub use form_values::{FieldValue, FormValues};
pub use forms::{
    validate_center_form, validate_doctor_form, validate_lab_staff_form, validate_patient_form,
    validate_receptionist_form,
};
pub use value_objects::Entity;
