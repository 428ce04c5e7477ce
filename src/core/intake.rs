//! Validation-and-append pipeline
//!
//! `IntakeService` is the single entry point a transport binding needs: it
//! validates a raw submission and, when it is valid, appends the shipment to
//! the record store. It holds no request state, so HTTP handlers, tests, or a
//! CLI can all drive it directly.

use crate::core::error::StoreError;
use crate::core::messages::MessageCatalog;
use crate::core::shipment::{ShipmentRecord, Submission};
use crate::core::store::RecordStore;
use crate::core::validation::{self, ValidationErrors};
use std::sync::Arc;

/// Result of a submission that reached the store or was rejected before it
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The shipment was validated and persisted
    Accepted(ShipmentRecord),
    /// One or more fields failed validation; nothing was persisted
    Rejected(ValidationErrors),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }
}

/// Validates submissions and persists the valid ones
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn RecordStore>,
    catalog: MessageCatalog,
}

impl IntakeService {
    pub fn new(store: Arc<dyn RecordStore>, catalog: MessageCatalog) -> Self {
        Self { store, catalog }
    }

    /// Validate a submission and append it to the store when valid
    ///
    /// Validation failures are an `Ok(Rejected)` outcome; only a failed write
    /// is an error.
    pub async fn submit(&self, submission: &Submission) -> Result<SubmissionOutcome, StoreError> {
        let shipment = match validation::check(submission, &self.catalog) {
            Ok(shipment) => shipment,
            Err(errors) => {
                tracing::debug!(
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "Shipment submission rejected"
                );
                return Ok(SubmissionOutcome::Rejected(errors));
            }
        };

        match self.store.append(shipment).await {
            Ok(record) => {
                tracing::info!(
                    shipment_type = %record.shipment_type,
                    weight = record.weight,
                    insurance = record.insurance,
                    "Shipment accepted"
                );
                Ok(SubmissionOutcome::Accepted(record))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist shipment");
                Err(e)
            }
        }
    }
}
