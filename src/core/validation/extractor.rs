//! Axum extractor for JSON submissions
//!
//! This module provides the `JsonSubmission` extractor that turns a JSON
//! request body into a [`Submission`] before it reaches the handler. Field
//! rules are not applied here; that happens in the intake service so the
//! handler can report every failing field at once.

use crate::core::error::IntakeError;
use crate::core::shipment::Submission;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Axum extractor that reads a JSON object as a raw submission
///
/// Malformed JSON and non-object payloads are rejected with
/// [`IntakeError::InvalidBody`] (400).
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_shipment(
///     JsonSubmission(submission): JsonSubmission,
/// ) -> Result<Response, IntakeError> {
///     // submission holds the raw field values
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonSubmission(pub Submission);

impl<S> FromRequest<S> for JsonSubmission
where
    S: Send + Sync,
{
    type Rejection = IntakeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| IntakeError::InvalidBody(e.body_text()))?;

        Submission::from_json(&payload)
            .map(JsonSubmission)
            .ok_or_else(|| IntakeError::InvalidBody("expected an object of field values".into()))
    }
}
