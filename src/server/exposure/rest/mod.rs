//! JSON API exposure
//!
//! Offers the same submit operation as the HTML form to non-browser clients,
//! plus health check routes:
//!
//! - `POST /api/shipments`: 201 with the stored record, 422 with the field
//!   errors, or a typed error body when the store fails
//! - `GET /health`, `GET /healthz`

use crate::core::error::IntakeError;
use crate::core::intake::{IntakeService, SubmissionOutcome};
use crate::core::validation::JsonSubmission;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the JSON API router
    pub fn build_router(intake: Arc<IntakeService>) -> Router {
        Self::health_routes().merge(
            Router::new()
                .route("/api/shipments", post(create_shipment))
                .with_state(intake),
        )
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "parcel-intake"
        }))
    }
}

async fn create_shipment(
    State(intake): State<Arc<IntakeService>>,
    JsonSubmission(submission): JsonSubmission,
) -> Result<Response, IntakeError> {
    match intake.submit(&submission).await? {
        SubmissionOutcome::Accepted(record) => {
            Ok((StatusCode::CREATED, Json(record)).into_response())
        }
        SubmissionOutcome::Rejected(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Validation failed",
                "errors": errors
            })),
        )
            .into_response()),
    }
}
