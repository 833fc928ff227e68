//! Field-format checks applied before any write.
//!
//! Pure functions over already-trimmed input. Callers run checks in order and
//! stop at the first failure.

use std::str::FromStr;

use base64::Engine;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::enums::{UploaderType, DEFAULT_SPECIALIZATION};

pub const PHONE_DIGITS: usize = 10;
pub const AADHAR_DIGITS: usize = 12;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_SPECIALIZATION_LEN: usize = 50;
pub const MAX_HOSPITAL_LEN: usize = 200;
pub const MAX_FILE_NAME_LEN: usize = 255;
pub const MAX_FILE_TYPE_LEN: usize = 50;
pub const MAX_UPLOADER_ID_LEN: usize = 20;
pub const MAX_TIME_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Message is chosen per handler ("Name and phone are required", ...).
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Phone must be 10 digits")]
    InvalidPhone,

    #[error("Aadhar must be 12 digits")]
    InvalidAadhar,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Appointment date must be a valid YYYY-MM-DD date")]
    InvalidDate,

    #[error("Uploader type must be one of patient, doctor, worker")]
    InvalidUploaderType,

    #[error("File data must be base64 encoded")]
    InvalidPayload,
}

/// Fails with `message` unless every value is non-empty.
pub fn require(values: &[&str], message: &'static str) -> Result<(), ValidationError> {
    if values.iter().all(|v| !v.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(message))
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_digits(phone, PHONE_DIGITS) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_aadhar(aadhar: &str) -> Result<(), ValidationError> {
    if is_digits(aadhar, AADHAR_DIGITS) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAadhar)
    }
}

/// Length limit counted in characters, not bytes.
pub fn max_len(value: &str, field: &'static str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() <= max {
        Ok(())
    } else {
        Err(ValidationError::TooLong { field, max })
    }
}

/// Empty input falls back to "General"; anything else is kept as typed.
pub fn normalize_specialization(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        DEFAULT_SPECIALIZATION.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn parse_appointment_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

pub fn parse_uploader_type(value: &str) -> Result<UploaderType, ValidationError> {
    UploaderType::from_str(value).map_err(|_| ValidationError::InvalidUploaderType)
}

/// Decode a base64 payload, with or without a `data:<mime>;base64,` prefix.
pub fn decode_payload(data: &str) -> Result<Vec<u8>, ValidationError> {
    let encoded = match data.find(',') {
        Some(idx) if data.starts_with("data:") => &data[idx + 1..],
        _ => data,
    };

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| ValidationError::InvalidPayload)
}

/// MIME type declared in a data URL prefix, if any.
pub fn data_url_mime(data: &str) -> Option<&str> {
    let header = data.strip_prefix("data:")?;
    let end = header.find([';', ','])?;
    let mime = &header[..end];
    (!mime.is_empty()).then_some(mime)
}
