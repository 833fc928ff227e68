//! Patient endpoints.
//!
//! - `POST /api/register-patient/`
//! - `POST /api/login-patient/`
//! - `GET /api/patient-files/:aadhar/`: newest first
//! - `GET /api/verify-patient/:aadhar/`: QR lookup

use axum::extract::{Path, State};
use serde::Serialize;

use crate::api::types::{success, ApiContext, ApiJson, ApiResult};
use crate::models::{MedicalFile, Patient};
use crate::registry::{self, NewPatient, PatientLogin};

/// Display format for `uploaded_at` in file listings (UTC).
const UPLOADED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
pub struct PatientData {
    pub aadhar: String,
    pub name: String,
    pub phone: String,
    /// Empty when not provided at registration.
    pub email: String,
}

impl From<Patient> for PatientData {
    fn from(p: Patient) -> Self {
        Self {
            aadhar: p.aadhar,
            name: p.name,
            phone: p.phone,
            email: p.email.unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub patient_data: PatientData,
}

#[derive(Serialize)]
pub struct PatientResponse {
    pub patient_data: PatientData,
}

#[derive(Serialize)]
pub struct FileSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: i64,
    /// `"<uploader_type>-<uploader_id>"`
    pub uploader: String,
    pub uploaded_at: String,
    pub data_url: String,
}

impl From<MedicalFile> for FileSummary {
    fn from(f: MedicalFile) -> Self {
        Self {
            id: f.id.to_string(),
            uploader: format!("{}-{}", f.uploader_type, f.uploader_id),
            uploaded_at: f.uploaded_at.format(UPLOADED_AT_FORMAT).to_string(),
            name: f.file_name,
            file_type: f.file_type,
            size: f.file_size,
            data_url: f.file_data,
        }
    }
}

#[derive(Serialize)]
pub struct FilesResponse {
    pub files: Vec<FileSummary>,
}

/// `POST /api/register-patient/`
pub async fn register(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<NewPatient>,
) -> ApiResult<RegisterResponse> {
    let conn = ctx.open_db()?;
    let patient = registry::register_patient(&conn, &req)?;

    Ok(success(RegisterResponse {
        message: "Patient registered successfully",
        patient_data: patient.into(),
    }))
}

/// `POST /api/login-patient/`: identification by name and phone.
pub async fn login(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<PatientLogin>,
) -> ApiResult<PatientResponse> {
    let conn = ctx.open_db()?;
    let patient = registry::login_patient(&conn, &req)?;

    Ok(success(PatientResponse {
        patient_data: patient.into(),
    }))
}

/// `GET /api/patient-files/:aadhar/`
pub async fn files(
    State(ctx): State<ApiContext>,
    Path(aadhar): Path<String>,
) -> ApiResult<FilesResponse> {
    let conn = ctx.open_db()?;
    let files = registry::patient_files(&conn, &aadhar)?;

    Ok(success(FilesResponse {
        files: files.into_iter().map(FileSummary::from).collect(),
    }))
}

/// `GET /api/verify-patient/:aadhar/`
pub async fn verify(
    State(ctx): State<ApiContext>,
    Path(aadhar): Path<String>,
) -> ApiResult<PatientResponse> {
    let conn = ctx.open_db()?;
    let patient = registry::find_patient(&conn, &aadhar)?;

    Ok(success(PatientResponse {
        patient_data: patient.into(),
    }))
}
