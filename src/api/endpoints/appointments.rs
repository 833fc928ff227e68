//! Appointment booking.

use axum::extract::State;
use serde::Serialize;

use crate::api::types::{success, ApiContext, ApiJson, ApiResult};
use crate::models::Appointment;
use crate::registry::{self, NewAppointment};

#[derive(Serialize)]
pub struct AppointmentData {
    pub code: String,
    pub hospital: String,
    pub doctor: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
}

impl From<Appointment> for AppointmentData {
    fn from(a: Appointment) -> Self {
        Self {
            code: a.appointment_code,
            hospital: a.hospital,
            doctor: a.doctor_name,
            date: a.appointment_date.format("%Y-%m-%d").to_string(),
            time: a.appointment_time,
        }
    }
}

#[derive(Serialize)]
pub struct BookResponse {
    pub message: &'static str,
    pub appointment_code: String,
    pub appointment_data: AppointmentData,
}

/// `POST /api/book-appointment/`: issues an `APT` code, status `scheduled`.
pub async fn book(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<NewAppointment>,
) -> ApiResult<BookResponse> {
    let conn = ctx.open_db()?;
    let appointment = registry::book_appointment(&conn, &req)?;

    Ok(success(BookResponse {
        message: "Appointment booked successfully",
        appointment_code: appointment.appointment_code.clone(),
        appointment_data: appointment.into(),
    }))
}
