//! Repository layer: entity-scoped database operations.
//!
//! Plain functions over a borrowed `Connection`, one sub-module per entity.
//! All public functions are re-exported here.

mod appointment;
mod medical_file;
mod patient;
mod staff;

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection};

use super::DatabaseError;

pub use appointment::*;
pub use medical_file::*;
pub use patient::*;
pub use staff::*;

/// Entity classes with a single-column primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Doctor,
    HealthWorker,
    MedicalFile,
    Appointment,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Patient => "patients",
            Self::Doctor => "doctors",
            Self::HealthWorker => "health_workers",
            Self::MedicalFile => "medical_files",
            Self::Appointment => "appointments",
        }
    }

    pub fn key_column(&self) -> &'static str {
        match self {
            Self::Patient => "aadhar",
            Self::Doctor => "doctor_id",
            Self::HealthWorker => "worker_id",
            Self::MedicalFile => "id",
            Self::Appointment => "appointment_code",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::HealthWorker => "health_worker",
            Self::MedicalFile => "medical_file",
            Self::Appointment => "appointment",
        }
    }
}

/// Whether a row with the given primary key exists.
pub fn exists(conn: &Connection, kind: EntityKind, key: &str) -> Result<bool, DatabaseError> {
    // Table and column names come from the closed `EntityKind` set.
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1)",
        kind.table(),
        kind.key_column()
    );
    let found: bool = conn.query_row(&sql, params![key], |row| row.get(0))?;
    Ok(found)
}

/// Number of rows stored for an entity class.
pub fn count(conn: &Connection, kind: EntityKind) -> Result<i64, DatabaseError> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(n)
}

/// Map an INSERT failure onto the domain error.
///
/// Primary-key and UNIQUE violations become `Conflict`; a foreign-key
/// violation means the owning row is gone and becomes `NotFound` for `parent`.
pub(crate) fn insert_error(
    err: rusqlite::Error,
    kind: EntityKind,
    key: &str,
    parent: Option<(EntityKind, &str)>,
) -> DatabaseError {
    if let rusqlite::Error::SqliteFailure(code, detail) = &err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation {
            return match code.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => DatabaseError::Conflict {
                    entity_type: kind.name().into(),
                    key: key.into(),
                },
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => match parent {
                    Some((parent_kind, parent_key)) => DatabaseError::NotFound {
                        entity_type: parent_kind.name().into(),
                        id: parent_key.into(),
                    },
                    None => DatabaseError::ConstraintViolation("foreign key".into()),
                },
                _ => DatabaseError::ConstraintViolation(
                    detail.clone().unwrap_or_else(|| code.to_string()),
                ),
            };
        }
    }
    DatabaseError::Sqlite(err)
}

/// Current time at the precision timestamps are stored with (microseconds),
/// so a record read back compares equal to the one written.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width UTC timestamp so lexical order matches chronological order.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad timestamp {raw}: {e}")))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad date {raw}: {e}")))
}
