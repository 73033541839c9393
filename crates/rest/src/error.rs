//! Error types for the Recipebox API.
//!
//! Malformed filter values are not errors: they are dropped while the query
//! is parsed. What reaches this module are datastore failures and requests
//! whose query string cannot be decoded at all.
//!
//! # Error Mapping
//!
//! | Route | Storage Error | HTTP Status | Code |
//! |-------|--------------|-------------|------|
//! | recipe routes | any | 500 | internal |
//! | `/_readiness` | ConnectionFailed / Unavailable | 503 | unavailable |
//! | `/_readiness` | any other | 500 | internal |
//!
//! Every error renders as:
//!
//! ```json
//! { "error": { "code": "internal", "message": "..." } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recipebox_persistence::error::StorageError;
use thiserror::Error;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The request could not be decoded (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },

    /// The datastore cannot be reached (HTTP 503).
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::BadRequest { .. } => "bad_request",
            RestError::InternalError { .. } => "internal",
            RestError::ServiceUnavailable { .. } => "unavailable",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}

impl RestError {
    /// Maps a failed readiness probe.
    ///
    /// Unlike the recipe routes, the probe reports an unreachable datastore
    /// as 503 so load balancers can tell it apart from a broken one.
    pub fn from_readiness_failure(err: StorageError) -> Self {
        if err.is_unavailable() {
            tracing::error!(error = %err, "Datastore unavailable");
            RestError::ServiceUnavailable {
                message: err.to_string(),
            }
        } else {
            err.into()
        }
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");

        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type for REST API operations.
pub type RestResult<T> = Result<T, RestError>;
