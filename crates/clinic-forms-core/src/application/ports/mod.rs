//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented in
//!   `clinic-forms-adapters`
//!   - `SubmissionGateway`: where validated forms go
//!
//! - **Driving (Input) Ports**: the CLI calls services directly

pub mod output;

pub use output::{SubmissionGateway, SubmissionReceipt};

#[cfg(test)]
pub use output::MockSubmissionGateway;
