//! Application services - orchestrate use cases.

pub mod submission_service;

pub use submission_service::SubmissionService;
