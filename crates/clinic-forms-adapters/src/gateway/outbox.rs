//! Outbox gateway: accepted submissions become JSON documents on disk.
//!
//! Layout: `<root>/<entity>/<id>.json`. Whatever ships submissions onward
//! picks them up from there.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use clinic_forms_core::{
    application::{ApplicationError, SubmissionGateway, SubmissionReceipt},
    domain::{Entity, FormValues},
    error::{CoreError, CoreResult},
};

#[derive(Serialize)]
struct OutboxDocument<'a> {
    id: Uuid,
    entity: Entity,
    queued_at: DateTime<Utc>,
    values: &'a FormValues,
}

/// Filesystem-backed submission gateway.
#[derive(Debug, Clone)]
pub struct OutboxGateway {
    root: PathBuf,
}

impl OutboxGateway {
    /// Create a gateway writing under `root`. Nothing is created until the
    /// first submission.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the document for `receipt` lives.
    pub fn path_for(&self, receipt: &SubmissionReceipt) -> PathBuf {
        self.root
            .join(receipt.entity.as_str())
            .join(format!("{}.json", receipt.id))
    }
}

impl SubmissionGateway for OutboxGateway {
    #[instrument(skip_all, fields(entity = %entity, root = %self.root.display()))]
    fn submit(&self, entity: Entity, values: &FormValues) -> CoreResult<SubmissionReceipt> {
        let receipt = SubmissionReceipt::new(entity);
        let path = self.path_for(&receipt);

        let document = OutboxDocument {
            id: receipt.id,
            entity,
            queued_at: Utc::now(),
            values,
        };
        let json = serde_json::to_string_pretty(&document).map_err(|e| CoreError::Internal {
            message: format!("Failed to serialise submission: {e}"),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create outbox directory"))?;
        }
        std::fs::write(&path, json).map_err(|e| map_io_error(&path, e, "write submission"))?;

        debug!(path = %path.display(), "Submission written to outbox");
        Ok(receipt)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CoreError {
    ApplicationError::GatewayFailed {
        reason: format!("Failed to {} at {}: {}", operation, path.display(), e),
    }
    .into()
}
