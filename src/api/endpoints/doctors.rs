//! Doctor endpoints and the specialization list.

use axum::extract::State;
use serde::Serialize;

use crate::api::types::{success, ApiContext, ApiJson, ApiResult};
use crate::models::enums::SPECIALIZATIONS;
use crate::models::Doctor;
use crate::registry::{self, DoctorLogin, NewDoctor};

#[derive(Serialize)]
pub struct DoctorData {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub hospital: String,
}

impl From<Doctor> for DoctorData {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.doctor_id,
            name: d.name,
            specialization: d.specialization,
            hospital: d.hospital,
        }
    }
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub doctor_id: String,
    pub doctor_data: DoctorData,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub doctor_data: DoctorData,
}

#[derive(Serialize)]
pub struct SpecializationsResponse {
    pub specializations: &'static [&'static str],
}

/// `POST /api/register-doctor/`: issues a `DOC` code.
pub async fn register(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<NewDoctor>,
) -> ApiResult<RegisterResponse> {
    let conn = ctx.open_db()?;
    let doctor = registry::register_doctor(&conn, &req)?;

    Ok(success(RegisterResponse {
        message: format!("Doctor registered successfully! ID: {}", doctor.doctor_id),
        doctor_id: doctor.doctor_id.clone(),
        doctor_data: doctor.into(),
    }))
}

/// `POST /api/login-doctor/`
pub async fn login(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<DoctorLogin>,
) -> ApiResult<LoginResponse> {
    let conn = ctx.open_db()?;
    let doctor = registry::login_doctor(&conn, &req)?;

    Ok(success(LoginResponse {
        doctor_data: doctor.into(),
    }))
}

/// `GET /api/specializations/`
pub async fn specializations() -> ApiResult<SpecializationsResponse> {
    Ok(success(SpecializationsResponse {
        specializations: SPECIALIZATIONS,
    }))
}
