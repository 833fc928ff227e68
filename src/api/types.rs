//! Shared types for the portal API layer.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the portal router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }

    /// Fresh connection for the current request.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        Ok(self.core.open_db()?)
    }
}

// ═══════════════════════════════════════════════════════════
// Request body extraction
// ═══════════════════════════════════════════════════════════

/// JSON body extractor whose rejection is the uniform failure envelope.
///
/// Unlike `axum::Json` it does not insist on a `Content-Type` header: the
/// portal's form posts plain JSON text, so any body that parses is accepted.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
                _ => ApiError::MalformedRequest(rejection.body_text()),
            })?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| ApiError::MalformedRequest(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════
// Success envelope
// ═══════════════════════════════════════════════════════════

/// `{"success": true, ...body}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

pub fn success<T: Serialize>(body: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        body,
    })
}

pub type ApiResult<T> = Result<Json<Success<T>>, ApiError>;
