//! Health check endpoint.

use axum::extract::State;
use serde::Serialize;

use crate::api::types::{success, ApiContext, ApiResult};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// `GET /api/health`: liveness probe. Opens a connection so a broken
/// database file is reported as a failure.
pub async fn check(State(ctx): State<ApiContext>) -> ApiResult<HealthResponse> {
    let _conn = ctx.open_db()?;

    Ok(success(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        database: "ok",
    }))
}
