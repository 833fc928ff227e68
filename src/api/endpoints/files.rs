//! Medical file upload.
//!
//! `POST /api/upload-file/`: the payload arrives inline as base64 (optionally
//! a data URL) and is stored as sent; listing echoes it back as `data_url`.

use axum::extract::State;
use serde::Serialize;

use crate::api::types::{success, ApiContext, ApiJson, ApiResult};
use crate::registry::{self, NewMedicalFile};

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub file_id: String,
}

pub async fn upload(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<NewMedicalFile>,
) -> ApiResult<UploadResponse> {
    let conn = ctx.open_db()?;
    let file = registry::upload_file(&conn, &req)?;

    Ok(success(UploadResponse {
        message: "File uploaded successfully",
        file_id: file.id.to_string(),
    }))
}
