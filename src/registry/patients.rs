use rusqlite::Connection;
use serde::Deserialize;

use super::{clean, RegistryError, PATIENT_NOT_FOUND};
use crate::db::{self, DatabaseError, EntityKind};
use crate::models::*;
use crate::validation::{self, MAX_EMAIL_LEN, MAX_NAME_LEN};

const PATIENT_EXISTS: &str = "Patient with this Aadhar already exists";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub aadhar: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientLogin {
    pub name: String,
    pub phone: String,
}

pub fn register_patient(conn: &Connection, req: &NewPatient) -> Result<Patient, RegistryError> {
    let name = clean(&req.name);
    let phone = clean(&req.phone);
    let aadhar = clean(&req.aadhar);
    let email = clean(&req.email);

    validation::require(&[&name, &phone, &aadhar], "All required fields must be filled")?;
    validation::validate_phone(&phone)?;
    validation::validate_aadhar(&aadhar)?;
    validation::max_len(&name, "Name", MAX_NAME_LEN)?;
    validation::max_len(&email, "Email", MAX_EMAIL_LEN)?;

    if db::exists(conn, EntityKind::Patient, &aadhar)? {
        return Err(RegistryError::Conflict(PATIENT_EXISTS));
    }

    let patient = Patient {
        aadhar,
        name,
        phone,
        email: (!email.is_empty()).then_some(email),
        created_at: db::timestamp_now(),
    };

    insert_new_patient(conn, &patient)?;

    tracing::info!("Patient registered");
    Ok(patient)
}

/// Insert after the `exists` check. A concurrent registration of the same
/// Aadhar can still win the primary key, which reads as a duplicate here.
fn insert_new_patient(conn: &Connection, patient: &Patient) -> Result<(), RegistryError> {
    match db::insert_patient(conn, patient) {
        Ok(()) => Ok(()),
        Err(DatabaseError::Conflict { .. }) => Err(RegistryError::Conflict(PATIENT_EXISTS)),
        Err(e) => Err(e.into()),
    }
}

/// Identify a patient by exact name and phone. Not authentication.
pub fn login_patient(conn: &Connection, req: &PatientLogin) -> Result<Patient, RegistryError> {
    let name = clean(&req.name);
    let phone = clean(&req.phone);

    validation::require(&[&name, &phone], "Name and phone are required")?;

    let mut matches = db::find_patients_by_name_and_phone(conn, &name, &phone)?;
    match matches.len() {
        0 => Err(RegistryError::NotFound(PATIENT_NOT_FOUND)),
        1 => Ok(matches.remove(0)),
        n => {
            tracing::warn!(matches = n, "Patient lookup by name and phone is ambiguous");
            Err(RegistryError::Ambiguous(
                "Multiple patients match this name and phone",
            ))
        }
    }
}

/// Look up a patient by ID (QR verification and file listing).
pub fn find_patient(conn: &Connection, aadhar: &str) -> Result<Patient, RegistryError> {
    db::get_patient(conn, aadhar.trim())?.ok_or(RegistryError::NotFound(PATIENT_NOT_FOUND))
}

/// Files owned by an existing patient, newest first.
pub fn patient_files(conn: &Connection, aadhar: &str) -> Result<Vec<MedicalFile>, RegistryError> {
    let patient = find_patient(conn, aadhar)?;
    Ok(db::list_files_for_patient(conn, &patient.aadhar)?)
}
