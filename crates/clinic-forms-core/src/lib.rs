//! Clinic Forms Core - validation rules and the submission gate
//!
//! This crate provides the domain and application layers for clinic record
//! keeping forms (patients, doctors, receptionists, centers, lab staff),
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        clinic-forms-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (SubmissionService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (SubmissionGateway)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   clinic-forms-adapters (Infrastructure)│
//! │   (MemoryGateway, OutboxGateway, loader)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (field rules, entity forms, ErrorMap)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use clinic_forms_core::domain::{Entity, FormValues, has_form_errors};
//!
//! let values = FormValues::new()
//!     .with("name", "Asha Rao")
//!     .with("phone", "9876543210")
//!     .with("email", "a@b.com")
//!     .with("username", "asha_01")
//!     .with("password", "abcd1234");
//!
//! let errors = Entity::Receptionist.validate(&values);
//! assert!(!has_form_errors(&errors));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        SubmissionReceipt, SubmissionService, ports::SubmissionGateway,
    };
    pub use crate::domain::{
        Entity, ErrorKind, ErrorMap, FieldError, FieldValue, FormValues, clear_form_errors,
        get_first_error, has_form_errors,
    };
    pub use crate::error::{CoreError, CoreResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
