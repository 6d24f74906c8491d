//! Infrastructure adapters for clinic-forms.
//!
//! This crate implements the ports defined in
//! `clinic-forms-core::application::ports` and owns every filesystem touch:
//! reading form files and writing accepted submissions.

pub mod form_loader;
pub mod gateway;

// Re-export commonly used adapters
pub use form_loader::{FormFormat, discover_forms, load_form, parse_form_str};
pub use gateway::{MemoryGateway, OutboxGateway, RecordedSubmission};
