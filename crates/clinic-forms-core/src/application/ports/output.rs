//! Driven (output) ports - implemented by infrastructure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Entity, FormValues};
use crate::error::CoreResult;

/// Acknowledgement that a gateway accepted a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub entity: Entity,
}

impl SubmissionReceipt {
    pub fn new(entity: Entity) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity,
        }
    }
}

/// Port for handing validated forms to whatever stores them.
///
/// Implemented by:
/// - `clinic_forms_adapters::MemoryGateway` (testing, embedding)
/// - `clinic_forms_adapters::OutboxGateway` (JSON documents on disk)
///
/// The application only calls `submit` for forms whose error map is clean.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionGateway: Send + Sync {
    fn submit(&self, entity: Entity, values: &FormValues) -> CoreResult<SubmissionReceipt>;
}
