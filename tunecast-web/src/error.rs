//! Error types for tunecast-web
//!
//! Every failure inside the submission workflow collapses into a single
//! plain-text 500 for the visitor. Only form validation problems get a 400.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::{CatalogError, CredentialError};

/// Failure of one step in the submission workflow
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Store connect, insert or query failed
    #[error("Store step failed: {0}")]
    Store(#[from] tunecast_common::Error),

    #[error("Credential exchange failed: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Catalog search failed: {0}")]
    Catalog(#[from] CatalogError),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid form input (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Workflow failure (500)
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// tunecast-common error; 400 for client errors, 500 otherwise
    #[error(transparent)]
    Common(tunecast_common::Error),
}

impl From<tunecast_common::Error> for ApiError {
    fn from(err: tunecast_common::Error) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Common(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!(reason = %msg, "Rejected request");
                (StatusCode::BAD_REQUEST, format!("Bad Request: {}", msg)).into_response()
            }
            ApiError::Submission(ref err) => {
                tracing::error!(error = %err, "Server error");
                internal_error()
            }
            ApiError::Common(ref err) => {
                tracing::error!(error = %err, "Server error");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
