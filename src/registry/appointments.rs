use rand::Rng;
use rusqlite::Connection;
use serde::Deserialize;

use super::{clean, missing_parent, RegistryError, PATIENT_NOT_FOUND};
use crate::db::{self, EntityKind};
use crate::ids::{self, APPOINTMENT_CODE};
use crate::models::enums::AppointmentStatus;
use crate::models::*;
use crate::validation::{self, MAX_HOSPITAL_LEN, MAX_NAME_LEN, MAX_TIME_LEN};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewAppointment {
    pub patient_aadhar: String,
    pub hospital: String,
    pub doctor_name: String,
    /// `YYYY-MM-DD`
    pub appointment_date: String,
    /// Free text, e.g. "10:30 AM".
    pub appointment_time: String,
}

pub fn book_appointment(
    conn: &Connection,
    req: &NewAppointment,
) -> Result<Appointment, RegistryError> {
    book_appointment_with_rng(conn, req, &mut rand::thread_rng())
}

pub fn book_appointment_with_rng<R: Rng + ?Sized>(
    conn: &Connection,
    req: &NewAppointment,
    rng: &mut R,
) -> Result<Appointment, RegistryError> {
    let patient_aadhar = clean(&req.patient_aadhar);
    let hospital = clean(&req.hospital);
    let doctor_name = clean(&req.doctor_name);
    let date = clean(&req.appointment_date);
    let time = clean(&req.appointment_time);

    validation::require(
        &[&patient_aadhar, &hospital, &doctor_name, &date, &time],
        "All fields are required",
    )?;
    let appointment_date = validation::parse_appointment_date(&date)?;
    validation::max_len(&hospital, "Hospital", MAX_HOSPITAL_LEN)?;
    validation::max_len(&doctor_name, "Doctor name", MAX_NAME_LEN)?;
    validation::max_len(&time, "Appointment time", MAX_TIME_LEN)?;

    if !db::exists(conn, EntityKind::Patient, &patient_aadhar)? {
        return Err(RegistryError::NotFound(PATIENT_NOT_FOUND));
    }

    let appointment = ids::create_with_unique_id(
        &APPOINTMENT_CODE,
        rng,
        |code| db::exists(conn, EntityKind::Appointment, code),
        |code| {
            let appointment = Appointment {
                appointment_code: code.to_string(),
                patient_aadhar: patient_aadhar.clone(),
                hospital: hospital.clone(),
                doctor_name: doctor_name.clone(),
                appointment_date,
                appointment_time: time.clone(),
                status: AppointmentStatus::Scheduled,
                created_at: db::timestamp_now(),
            };
            db::insert_appointment(conn, &appointment)?;
            Ok(appointment)
        },
    )
    .map_err(missing_parent)?;

    tracing::info!(
        appointment_code = %appointment.appointment_code,
        date = %appointment.appointment_date,
        "Appointment booked"
    );
    Ok(appointment)
}
