use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use super::{format_timestamp, insert_error, parse_date, parse_timestamp, EntityKind};
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const APPOINTMENT_COLUMNS: &str = "appointment_code, patient_aadhar, hospital, doctor_name,
     appointment_date, appointment_time, status, created_at";

type AppointmentRow = (String, String, String, String, String, String, String, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn into_appointment(raw: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let (code, patient_aadhar, hospital, doctor_name, date, time, status, created_at) = raw;
    Ok(Appointment {
        appointment_code: code,
        patient_aadhar,
        hospital,
        doctor_name,
        appointment_date: parse_date(&date)?,
        appointment_time: time,
        status: AppointmentStatus::from_str(&status)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO appointments ({APPOINTMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ),
        params![
            appt.appointment_code,
            appt.patient_aadhar,
            appt.hospital,
            appt.doctor_name,
            appt.appointment_date.format("%Y-%m-%d").to_string(),
            appt.appointment_time,
            appt.status.as_str(),
            format_timestamp(&appt.created_at),
        ],
    )
    .map_err(|e| {
        insert_error(
            e,
            EntityKind::Appointment,
            &appt.appointment_code,
            Some((EntityKind::Patient, &appt.patient_aadhar)),
        )
    })?;
    Ok(())
}

pub fn get_appointment(
    conn: &Connection,
    code: &str,
) -> Result<Option<Appointment>, DatabaseError> {
    let raw = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE appointment_code = ?1"),
            params![code],
            read_row,
        )
        .optional()?;
    raw.map(into_appointment).transpose()
}

pub fn list_appointments_for_patient(
    conn: &Connection,
    aadhar: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE patient_aadhar = ?1
         ORDER BY appointment_date ASC, created_at ASC"
    ))?;
    let rows = stmt.query_map(params![aadhar], read_row)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(into_appointment(row?)?);
    }
    Ok(appointments)
}
