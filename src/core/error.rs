//! Typed error handling for the intake service
//!
//! # Error Categories
//!
//! - [`StoreError`]: failure to persist the shipment collection
//! - [`ConfigError`]: failure to load or interpret configuration
//! - [`IntakeError`]: top-level error surfaced to the HTTP layer
//!
//! Per-field validation failures are not errors in this sense; they are
//! returned as [`ValidationErrors`](crate::core::validation::ValidationErrors)
//! and rendered back to the user.
//!
//! # Example
//!
//! ```rust,ignore
//! match intake.submit(&submission).await {
//!     Ok(SubmissionOutcome::Accepted(record)) => render_success(),
//!     Ok(SubmissionOutcome::Rejected(errors)) => render_form(&submission, &errors),
//!     Err(StoreError::Write { path, .. }) => {
//!         eprintln!("could not write {}", path.display());
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Store Errors
// =============================================================================

/// Failure to persist the shipment collection
///
/// Read failures never appear here: a missing or undecodable data file is
/// treated as an empty collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The directory holding the data file could not be created
    #[error("failed to create data directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection could not be encoded
    #[error("failed to encode shipment collection: {0}")]
    Encode(#[from] serde_json::Error),

    /// The data file could not be written or replaced
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::CreateDir { .. } => "STORE_CREATE_DIR_FAILED",
            StoreError::Encode(_) => "STORE_ENCODE_FAILED",
            StoreError::Write { .. } => "STORE_WRITE_FAILED",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for the expected shape
    #[error("failed to parse config{}: {source}", file_suffix(.file))]
    Parse {
        file: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    /// A value (usually from the environment) is not acceptable
    #[error("invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

fn file_suffix(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f.display()))
        .unwrap_or_default()
}

// =============================================================================
// Intake Errors
// =============================================================================

/// The main error type surfaced to the transport layer
#[derive(Debug)]
pub enum IntakeError {
    /// The shipment could not be persisted
    Store(StoreError),

    /// A page could not be rendered
    Template(tera::Error),

    /// Request body was malformed
    InvalidBody(String),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Store(e) => write!(f, "Shipment was not saved: {}", e),
            IntakeError::Template(e) => write!(f, "Failed to render page: {}", e),
            IntakeError::InvalidBody(msg) => write!(f, "Invalid request body: {}", msg),
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Store(e) => Some(e),
            IntakeError::Template(e) => Some(e),
            IntakeError::InvalidBody(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntakeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            IntakeError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            IntakeError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            IntakeError::Store(e) => e.error_code(),
            IntakeError::Template(_) => "TEMPLATE_ERROR",
            IntakeError::InvalidBody(_) => "INVALID_BODY",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            IntakeError::Store(StoreError::Write { path, .. })
            | IntakeError::Store(StoreError::CreateDir { path, .. }) => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<StoreError> for IntakeError {
    fn from(err: StoreError) -> Self {
        IntakeError::Store(err)
    }
}

impl From<tera::Error> for IntakeError {
    fn from(err: tera::Error) -> Self {
        IntakeError::Template(err)
    }
}
