use rand::Rng;
use rusqlite::Connection;
use serde::Deserialize;

use super::{clean, RegistryError};
use crate::db::{self, EntityKind};
use crate::ids::{self, DOCTOR_ID, WORKER_ID};
use crate::models::enums::is_known_specialization;
use crate::models::*;
use crate::validation::{self, MAX_HOSPITAL_LEN, MAX_NAME_LEN, MAX_SPECIALIZATION_LEN};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub hospital: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DoctorLogin {
    pub doctor_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewHealthWorker {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkerLogin {
    pub worker_id: String,
}

pub fn register_doctor(conn: &Connection, req: &NewDoctor) -> Result<Doctor, RegistryError> {
    register_doctor_with_rng(conn, req, &mut rand::thread_rng())
}

pub fn register_doctor_with_rng<R: Rng + ?Sized>(
    conn: &Connection,
    req: &NewDoctor,
    rng: &mut R,
) -> Result<Doctor, RegistryError> {
    let name = clean(&req.name);
    let hospital = clean(&req.hospital);
    let specialization = validation::normalize_specialization(&req.specialization);

    validation::require(&[&name, &hospital], "Name and hospital are required")?;
    validation::max_len(&name, "Name", MAX_NAME_LEN)?;
    validation::max_len(&hospital, "Hospital", MAX_HOSPITAL_LEN)?;
    validation::max_len(&specialization, "Specialization", MAX_SPECIALIZATION_LEN)?;

    if !is_known_specialization(&specialization) {
        tracing::debug!(%specialization, "Doctor registered with unlisted specialization");
    }

    let doctor = ids::create_with_unique_id(
        &DOCTOR_ID,
        rng,
        |code| db::exists(conn, EntityKind::Doctor, code),
        |code| {
            let doctor = Doctor {
                doctor_id: code.to_string(),
                name: name.clone(),
                specialization: specialization.clone(),
                hospital: hospital.clone(),
                created_at: db::timestamp_now(),
            };
            db::insert_doctor(conn, &doctor)?;
            Ok(doctor)
        },
    )?;

    tracing::info!(doctor_id = %doctor.doctor_id, "Doctor registered");
    Ok(doctor)
}

pub fn login_doctor(conn: &Connection, req: &DoctorLogin) -> Result<Doctor, RegistryError> {
    let doctor_id = clean(&req.doctor_id);
    validation::require(&[&doctor_id], "Doctor ID is required")?;

    db::get_doctor(conn, &doctor_id)?.ok_or(RegistryError::NotFound("Invalid Doctor ID"))
}

pub fn register_worker(
    conn: &Connection,
    req: &NewHealthWorker,
) -> Result<HealthWorker, RegistryError> {
    register_worker_with_rng(conn, req, &mut rand::thread_rng())
}

pub fn register_worker_with_rng<R: Rng + ?Sized>(
    conn: &Connection,
    req: &NewHealthWorker,
    rng: &mut R,
) -> Result<HealthWorker, RegistryError> {
    let name = clean(&req.name);
    let phone = clean(&req.phone);

    validation::require(&[&name, &phone], "Name and phone are required")?;
    validation::validate_phone(&phone)?;
    validation::max_len(&name, "Name", MAX_NAME_LEN)?;

    let worker = ids::create_with_unique_id(
        &WORKER_ID,
        rng,
        |code| db::exists(conn, EntityKind::HealthWorker, code),
        |code| {
            let worker = HealthWorker {
                worker_id: code.to_string(),
                name: name.clone(),
                phone: phone.clone(),
                created_at: db::timestamp_now(),
            };
            db::insert_health_worker(conn, &worker)?;
            Ok(worker)
        },
    )?;

    tracing::info!(worker_id = %worker.worker_id, "Health worker registered");
    Ok(worker)
}

pub fn login_worker(conn: &Connection, req: &WorkerLogin) -> Result<HealthWorker, RegistryError> {
    let worker_id = clean(&req.worker_id);
    validation::require(&[&worker_id], "Worker ID is required")?;

    db::get_health_worker(conn, &worker_id)?.ok_or(RegistryError::NotFound("Invalid Worker ID"))
}
