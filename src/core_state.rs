//! Shared application state handed to every request.
//!
//! Holds only immutable settings. Each request opens its own SQLite
//! connection; uniqueness and cascades are enforced by the database.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

use crate::config::AppConfig;
use crate::db::{self, DatabaseError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub struct CoreState {
    db_path: PathBuf,
    /// Upper bound on request bodies (files arrive inline as base64).
    pub max_body_bytes: usize,
}

impl CoreState {
    pub fn new(db_path: impl Into<PathBuf>, max_body_bytes: usize) -> Self {
        Self {
            db_path: db_path.into(),
            max_body_bytes,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.db_path.clone(), config.max_body_bytes)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection with pragmas applied and migrations current.
    pub fn open_db(&self) -> Result<Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_db_creates_schema_at_path() {
        let tmp = tempfile::tempdir().unwrap();
        let core = CoreState::new(tmp.path().join("portal.db"), 1024);
        let conn = core.open_db().unwrap();
        assert_eq!(db::count(&conn, db::EntityKind::Patient).unwrap(), 0);
        assert!(core.db_path().exists());
    }

    #[test]
    fn connections_share_the_same_file() {
        let tmp = tempfile::tempdir().unwrap();
        let core = CoreState::new(tmp.path().join("portal.db"), 1024);
        let first = core.open_db().unwrap();
        crate::registry::register_patient(
            &first,
            &crate::registry::NewPatient {
                name: "Asha".into(),
                phone: "9876543210".into(),
                aadhar: "123456789012".into(),
                email: String::new(),
            },
        )
        .unwrap();
        let second = core.open_db().unwrap();
        assert!(db::get_patient(&second, "123456789012").unwrap().is_some());
    }

    #[test]
    fn unopenable_path_reports_database_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let core = CoreState::new(tmp.path(), 1024);
        assert!(matches!(core.open_db(), Err(CoreError::Database(_))));
    }
}
