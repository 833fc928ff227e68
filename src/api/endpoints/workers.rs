//! Health worker endpoints.

use axum::extract::State;
use serde::Serialize;

use crate::api::types::{success, ApiContext, ApiJson, ApiResult};
use crate::models::HealthWorker;
use crate::registry::{self, NewHealthWorker, WorkerLogin};

#[derive(Serialize)]
pub struct WorkerData {
    pub id: String,
    pub name: String,
    pub phone: String,
}

impl From<HealthWorker> for WorkerData {
    fn from(w: HealthWorker) -> Self {
        Self {
            id: w.worker_id,
            name: w.name,
            phone: w.phone,
        }
    }
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub worker_id: String,
    pub worker_data: WorkerData,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub worker_data: WorkerData,
}

/// `POST /api/register-worker/`: issues a `WRK` code.
pub async fn register(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<NewHealthWorker>,
) -> ApiResult<RegisterResponse> {
    let conn = ctx.open_db()?;
    let worker = registry::register_worker(&conn, &req)?;

    Ok(success(RegisterResponse {
        message: format!(
            "Health Worker registered successfully! ID: {}",
            worker.worker_id
        ),
        worker_id: worker.worker_id.clone(),
        worker_data: worker.into(),
    }))
}

/// `POST /api/login-worker/`
pub async fn login(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<WorkerLogin>,
) -> ApiResult<LoginResponse> {
    let conn = ctx.open_db()?;
    let worker = registry::login_worker(&conn, &req)?;

    Ok(success(LoginResponse {
        worker_data: worker.into(),
    }))
}
