use rusqlite::{params, Connection, OptionalExtension};

use super::{format_timestamp, insert_error, parse_timestamp, EntityKind};
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (doctor_id, name, specialization, hospital, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            doctor.doctor_id,
            doctor.name,
            doctor.specialization,
            doctor.hospital,
            format_timestamp(&doctor.created_at),
        ],
    )
    .map_err(|e| insert_error(e, EntityKind::Doctor, &doctor.doctor_id, None))?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, doctor_id: &str) -> Result<Option<Doctor>, DatabaseError> {
    let raw = conn
        .query_row(
            "SELECT doctor_id, name, specialization, hospital, created_at
             FROM doctors WHERE doctor_id = ?1",
            params![doctor_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;

    raw.map(|(doctor_id, name, specialization, hospital, created_at)| {
        Ok(Doctor {
            doctor_id,
            name,
            specialization,
            hospital,
            created_at: parse_timestamp(&created_at)?,
        })
    })
    .transpose()
}

pub fn insert_health_worker(conn: &Connection, worker: &HealthWorker) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_workers (worker_id, name, phone, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            worker.worker_id,
            worker.name,
            worker.phone,
            format_timestamp(&worker.created_at),
        ],
    )
    .map_err(|e| insert_error(e, EntityKind::HealthWorker, &worker.worker_id, None))?;
    Ok(())
}

pub fn get_health_worker(
    conn: &Connection,
    worker_id: &str,
) -> Result<Option<HealthWorker>, DatabaseError> {
    let raw = conn
        .query_row(
            "SELECT worker_id, name, phone, created_at
             FROM health_workers WHERE worker_id = ?1",
            params![worker_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    raw.map(|(worker_id, name, phone, created_at)| {
        Ok(HealthWorker {
            worker_id,
            name,
            phone,
            created_at: parse_timestamp(&created_at)?,
        })
    })
    .transpose()
}
