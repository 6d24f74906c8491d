//! Submission Service - the validation gate in front of a gateway.
//!
//! Workflow:
//! 1. Validate the form with the entity's validator
//! 2. Reject it if any field failed
//! 3. Otherwise hand it to the gateway

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{SubmissionGateway, SubmissionReceipt},
    },
    domain::{Entity, ErrorMap, FormValues, has_form_errors},
    error::CoreResult,
};

/// Validates forms and forwards the clean ones.
pub struct SubmissionService {
    gateway: Box<dyn SubmissionGateway>,
}

impl SubmissionService {
    /// Create a new submission service with the given gateway.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use clinic_forms_core::application::SubmissionService;
    ///
    /// let service = SubmissionService::new(Box::new(gateway));
    /// ```
    pub fn new(gateway: Box<dyn SubmissionGateway>) -> Self {
        Self { gateway }
    }

    /// Validate only. Never touches the gateway.
    pub fn check(&self, entity: Entity, values: &FormValues) -> ErrorMap {
        entity.validate(values)
    }

    /// Validate, then submit when the form is clean.
    #[instrument(skip_all, fields(entity = %entity))]
    pub fn submit(&self, entity: Entity, values: &FormValues) -> CoreResult<SubmissionReceipt> {
        let errors = self.check(entity, values);

        if has_form_errors(&errors) {
            warn!(failed = errors.error_count(), "Form rejected");
            return Err(ApplicationError::FormRejected { entity, errors }.into());
        }

        debug!(fields = values.len(), "Form valid, forwarding to gateway");
        let receipt = self.gateway.submit(entity, values)?;
        info!(id = %receipt.id, "Form submitted");
        Ok(receipt)
    }
}
