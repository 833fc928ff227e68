use rusqlite::Connection;
use serde::Deserialize;
use uuid::Uuid;

use super::{clean, missing_parent, RegistryError, PATIENT_NOT_FOUND};
use crate::db::{self, EntityKind};
use crate::models::*;
use crate::validation::{self, MAX_FILE_NAME_LEN, MAX_FILE_TYPE_LEN, MAX_UPLOADER_ID_LEN};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewMedicalFile {
    pub patient_aadhar: String,
    pub file_name: String,
    /// Base64, optionally as a `data:` URL. Stored verbatim.
    pub file_data: String,
    pub file_type: String,
    /// Declared size; the decoded payload length is used when absent or not positive.
    pub file_size: Option<i64>,
    pub uploader_type: String,
    pub uploader_id: String,
}

pub fn upload_file(conn: &Connection, req: &NewMedicalFile) -> Result<MedicalFile, RegistryError> {
    let patient_aadhar = clean(&req.patient_aadhar);
    let file_name = clean(&req.file_name);
    let file_type = clean(&req.file_type);
    let uploader_type = clean(&req.uploader_type);
    let uploader_id = clean(&req.uploader_id);

    validation::require(
        &[&patient_aadhar, &file_name, &req.file_data, &uploader_type],
        "Required fields missing",
    )?;
    let uploader_type = validation::parse_uploader_type(&uploader_type)?;
    let payload = validation::decode_payload(&req.file_data)?;
    validation::max_len(&file_name, "File name", MAX_FILE_NAME_LEN)?;
    validation::max_len(&file_type, "File type", MAX_FILE_TYPE_LEN)?;
    validation::max_len(&uploader_id, "Uploader ID", MAX_UPLOADER_ID_LEN)?;

    if !db::exists(conn, EntityKind::Patient, &patient_aadhar)? {
        return Err(RegistryError::NotFound(PATIENT_NOT_FOUND));
    }

    let file_type = if file_type.is_empty() {
        infer_file_type(&file_name, &req.file_data)
    } else {
        file_type
    };
    let file_size = req
        .file_size
        .filter(|size| *size > 0)
        .unwrap_or(payload.len() as i64);

    let file = MedicalFile {
        id: Uuid::new_v4(),
        patient_aadhar,
        file_name,
        file_data: req.file_data.clone(),
        file_type,
        file_size,
        uploader_type,
        uploader_id,
        uploaded_at: db::timestamp_now(),
    };
    db::insert_medical_file(conn, &file).map_err(missing_parent)?;

    tracing::info!(
        file_id = %file.id,
        uploader_type = %file.uploader_type,
        size = file.file_size,
        "Medical file stored"
    );
    Ok(file)
}

/// MIME type from the data URL header, else from the file extension.
fn infer_file_type(file_name: &str, file_data: &str) -> String {
    match validation::data_url_mime(file_data) {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
