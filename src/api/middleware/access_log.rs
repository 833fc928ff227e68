//! Request logging middleware.
//!
//! Logs method, path, status and latency for every request. Failures keep
//! HTTP 200, so the outcome is read from the `FailureCode` extension that
//! `ApiError` attaches to its response.

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::error::FailureCode;

pub async fn log_request(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match response.extensions().get::<FailureCode>() {
        Some(FailureCode(code)) => tracing::info!(
            %method,
            path,
            status,
            outcome = code,
            elapsed_ms,
            "API request failed"
        ),
        None => tracing::info!(%method, path, status, outcome = "OK", elapsed_ms, "API request"),
    }

    response
}
