//! Application layer for Clinic Forms.
//!
//! This layer contains:
//! - **Services**: the submission gate (validate, then hand off)
//! - **Ports**: the gateway trait adapters implement
//! - **Errors**: application-specific error types
//!
//! All validation rules live in `crate::domain`; this layer only decides
//! what happens to a form once its error map is known.

pub mod error;
pub mod ports;
pub mod services;

pub use services::SubmissionService;

// Re-export port traits (for adapter implementation)
pub use ports::{SubmissionGateway, SubmissionReceipt};

pub use error::ApplicationError;
