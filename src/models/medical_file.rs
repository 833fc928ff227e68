use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UploaderType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalFile {
    pub id: Uuid,
    pub patient_aadhar: String,
    pub file_name: String,
    /// Base64 payload as uploaded, data URL prefix included when present.
    pub file_data: String,
    pub file_type: String,
    pub file_size: i64,
    pub uploader_type: UploaderType,
    /// Free text; not checked against doctors or workers.
    pub uploader_id: String,
    pub uploaded_at: DateTime<Utc>,
}
