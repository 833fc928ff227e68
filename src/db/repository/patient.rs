use rusqlite::{params, Connection, OptionalExtension};

use super::{format_timestamp, insert_error, parse_timestamp, EntityKind};
use crate::db::DatabaseError;
use crate::models::*;

const PATIENT_COLUMNS: &str = "aadhar, name, phone, email, created_at";

type PatientRow = (String, String, String, Option<String>, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn into_patient(raw: PatientRow) -> Result<Patient, DatabaseError> {
    let (aadhar, name, phone, email, created_at) = raw;
    Ok(Patient {
        aadhar,
        name,
        phone,
        email,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (aadhar, name, phone, email, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.aadhar,
            patient.name,
            patient.phone,
            patient.email,
            format_timestamp(&patient.created_at),
        ],
    )
    .map_err(|e| insert_error(e, EntityKind::Patient, &patient.aadhar, None))?;
    Ok(())
}

pub fn get_patient(conn: &Connection, aadhar: &str) -> Result<Option<Patient>, DatabaseError> {
    let raw = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE aadhar = ?1"),
            params![aadhar],
            read_row,
        )
        .optional()?;
    raw.map(into_patient).transpose()
}

/// Exact, case-sensitive match on both fields, oldest registration first.
pub fn find_patients_by_name_and_phone(
    conn: &Connection,
    name: &str,
    phone: &str,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         WHERE name = ?1 AND phone = ?2
         ORDER BY created_at ASC"
    ))?;

    let rows = stmt.query_map(params![name, phone], read_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(into_patient(row?)?);
    }
    Ok(patients)
}

/// Delete a patient; files and appointments go with it (ON DELETE CASCADE).
/// Returns `false` when no such patient existed.
pub fn delete_patient(conn: &Connection, aadhar: &str) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM patients WHERE aadhar = ?1", params![aadhar])?;
    if affected > 0 {
        tracing::info!("Patient deleted with dependent files and appointments");
    }
    Ok(affected > 0)
}
