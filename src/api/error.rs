//! API error type with the uniform failure envelope.
//!
//! Every failure is rendered as `{"success": false, "error": "<message>"}`
//! with HTTP 200; clients branch on `success`, not on status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::db::DatabaseError;
use crate::registry::RegistryError;

pub const INVALID_JSON: &str = "Invalid JSON data";
pub const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Failure response body.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

/// Short failure code attached to the response extensions for request logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureCode(pub &'static str);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Identifier space exhausted for {0}")]
    IdExhausted(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "MALFORMED_REQUEST",
            ApiError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::IdExhausted(_) => "ID_EXHAUSTED",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            ApiError::MalformedRequest(detail) => {
                tracing::debug!(detail, "Rejected malformed request body");
                INVALID_JSON.to_string()
            }
            ApiError::PayloadTooLarge => "Request body too large".to_string(),
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => {
                msg.clone()
            }
            ApiError::IdExhausted(prefix) => {
                tracing::error!(prefix, "Could not allocate identifier");
                "Could not allocate a unique ID, please try again".to_string()
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                INTERNAL_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = FailureBody {
            success: false,
            error: self.public_message(),
        };

        let mut response = (StatusCode::OK, Json(body)).into_response();
        response.extensions_mut().insert(FailureCode(self.code()));
        response
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(e) => ApiError::Validation(e.to_string()),
            RegistryError::NotFound(msg) => ApiError::NotFound(msg.to_string()),
            RegistryError::Conflict(msg) | RegistryError::Ambiguous(msg) => {
                ApiError::Conflict(msg.to_string())
            }
            RegistryError::Database(e) => e.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::IdSpaceExhausted { prefix, .. } => ApiError::IdExhausted(prefix),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Database(e) => e.into(),
        }
    }
}
