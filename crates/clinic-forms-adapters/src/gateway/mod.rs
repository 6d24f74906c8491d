//! Submission gateway adapters.

mod memory;
mod outbox;

pub use memory::{MemoryGateway, RecordedSubmission};
pub use outbox::OutboxGateway;
