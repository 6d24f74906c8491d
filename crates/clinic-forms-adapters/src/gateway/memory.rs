//! In-memory submission gateway.

use std::sync::{Arc, PoisonError, RwLock};

use clinic_forms_core::{
    application::{ApplicationError, SubmissionGateway, SubmissionReceipt},
    domain::{Entity, FormValues},
    error::CoreResult,
};
use tracing::debug;

/// One accepted submission as the gateway saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSubmission {
    pub receipt: SubmissionReceipt,
    pub values: FormValues,
}

/// Thread-safe gateway that records submissions instead of sending them.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<RwLock<Vec<RecordedSubmission>>>,
}

impl MemoryGateway {
    /// Create a new empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded submissions.
    /// Still answers after a writer panicked mid-lock.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn submissions(&self) -> CoreResult<Vec<RecordedSubmission>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::GatewayLockError)?;
        Ok(inner.clone())
    }

    /// Forget all recorded submissions.
    pub fn clear(&self) -> CoreResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::GatewayLockError)?;
        inner.clear();
        Ok(())
    }
}

impl SubmissionGateway for MemoryGateway {
    fn submit(&self, entity: Entity, values: &FormValues) -> CoreResult<SubmissionReceipt> {
        let receipt = SubmissionReceipt::new(entity);

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::GatewayLockError)?;
        inner.push(RecordedSubmission {
            receipt: receipt.clone(),
            values: values.clone(),
        });

        debug!(id = %receipt.id, entity = %entity, "Submission recorded in memory");
        Ok(receipt)
    }
}
