use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, insert_error, parse_timestamp, EntityKind};
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_medical_file(conn: &Connection, file: &MedicalFile) -> Result<(), DatabaseError> {
    let id = file.id.to_string();
    conn.execute(
        "INSERT INTO medical_files (id, patient_aadhar, file_name, file_data, file_type,
                                    file_size, uploader_type, uploader_id, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            id,
            file.patient_aadhar,
            file.file_name,
            file.file_data,
            file.file_type,
            file.file_size,
            file.uploader_type.as_str(),
            file.uploader_id,
            format_timestamp(&file.uploaded_at),
        ],
    )
    .map_err(|e| {
        insert_error(
            e,
            EntityKind::MedicalFile,
            &id,
            Some((EntityKind::Patient, &file.patient_aadhar)),
        )
    })?;
    Ok(())
}

/// All files owned by a patient, most recent upload first.
pub fn list_files_for_patient(
    conn: &Connection,
    aadhar: &str,
) -> Result<Vec<MedicalFile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_aadhar, file_name, file_data, file_type, file_size,
                uploader_type, uploader_id, uploaded_at
         FROM medical_files
         WHERE patient_aadhar = ?1
         ORDER BY uploaded_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map(params![aadhar], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i64>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
        ))
    })?;

    let mut files = Vec::new();
    for row in rows {
        let (
            id,
            patient_aadhar,
            file_name,
            file_data,
            file_type,
            file_size,
            uploader_type,
            uploader_id,
            uploaded_at,
        ) = row?;
        files.push(MedicalFile {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            patient_aadhar,
            file_name,
            file_data,
            file_type,
            file_size,
            uploader_type: UploaderType::from_str(&uploader_type)?,
            uploader_id,
            uploaded_at: parse_timestamp(&uploaded_at)?,
        });
    }
    Ok(files)
}
