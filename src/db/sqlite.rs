use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use super::DatabaseError;

/// How long a writer waits on a locked database before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema migrations, applied in order. Each script records its own version
/// in `schema_version`.
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_initial.sql"),
)];

/// Open the portal database at `path`, creating the file and its parent
/// directory on first use, and bring the schema up to date.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DatabaseError::MigrationFailed {
            version: 0,
            reason: format!("cannot create {}: {e}", parent.display()),
        })?;
    }

    let conn = Connection::open(path)?;
    configure(&conn, true)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure(&conn, false)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection, wal: bool) -> Result<(), DatabaseError> {
    // Cascading deletes from patients rely on this; SQLite defaults it off.
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if wal {
        // journal_mode answers with a row, so it cannot go through pragma_update.
        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "SQLite journal mode set");
    }
    Ok(())
}

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current = get_current_version(conn)?.unwrap_or(0);

    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        tracing::info!(version, "Running migration");
        conn.execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

/// Recorded schema version; `None` on a fresh database.
pub fn get_current_version(conn: &Connection) -> Result<Option<i64>, DatabaseError> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(None);
    }

    let version = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })?;
    Ok(version)
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}
