//! HTML form exposure
//!
//! - `GET /` renders the blank form
//! - `POST /` validates the submission; on success the shipment is stored and
//!   the success page is rendered, otherwise the form comes back with the
//!   user's input and an error next to each invalid field
//! - `GET /success` renders the success page

pub mod templates;

pub use templates::{FormView, Templates};

use crate::core::error::IntakeError;
use crate::core::intake::{IntakeService, SubmissionOutcome};
use crate::core::shipment::Submission;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

/// Shared state of the form handlers
#[derive(Clone)]
pub struct FormState {
    pub intake: Arc<IntakeService>,
    pub templates: Arc<Templates>,
}

/// HTML form exposure implementation
pub struct FormExposure;

impl FormExposure {
    /// Build the form routes
    pub fn build_router(state: FormState) -> Router {
        Router::new()
            .route("/", get(show_form).post(submit_form))
            .route("/success", get(show_success))
            .with_state(state)
    }
}

async fn show_form(State(state): State<FormState>) -> Result<Html<String>, IntakeError> {
    Ok(Html(state.templates.render_form(&FormView::empty())?))
}

async fn show_success(State(state): State<FormState>) -> Result<Html<String>, IntakeError> {
    Ok(Html(state.templates.render_success()?))
}

async fn submit_form(
    State(state): State<FormState>,
    Form(submission): Form<Submission>,
) -> Result<Response, IntakeError> {
    match state.intake.submit(&submission).await {
        Ok(SubmissionOutcome::Accepted(_)) => {
            Ok(Html(state.templates.render_success()?).into_response())
        }
        Ok(SubmissionOutcome::Rejected(errors)) => {
            let view = FormView::echo(&submission, &errors);
            Ok(Html(state.templates.render_form(&view)?).into_response())
        }
        Err(e) => {
            let err = IntakeError::from(e);
            let page = state.templates.render_error(err.error_code())?;
            Ok((err.status_code(), Html(page)).into_response())
        }
    }
}
