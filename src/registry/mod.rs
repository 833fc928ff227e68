//! Registration, login and booking flows.
//!
//! Each flow runs one linear sequence against a borrowed connection:
//! validate → look up dependency → generate identifier → insert. The first
//! failure is returned; nothing is written before every check has passed.
//! Transport concerns (JSON parsing, response envelopes) live in `api`.

mod appointments;
mod files;
mod patients;
mod staff;

pub use appointments::*;
pub use files::*;
pub use patients::*;
pub use staff::*;

use thiserror::Error;

use crate::db::DatabaseError;
use crate::validation::ValidationError;

pub const PATIENT_NOT_FOUND: &str = "Patient not found";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Ambiguous(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Owned, whitespace-trimmed copy of a request field.
pub(crate) fn clean(value: &str) -> String {
    value.trim().to_string()
}

/// Treat a foreign-key miss at insert time the same as a failed pre-check.
pub(crate) fn missing_parent(err: DatabaseError) -> RegistryError {
    match err {
        DatabaseError::NotFound { .. } => RegistryError::NotFound(PATIENT_NOT_FOUND),
        other => RegistryError::Database(other),
    }
}
