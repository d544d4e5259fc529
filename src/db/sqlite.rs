//! Connection setup and schema migrations for the diagnosis log.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use super::DatabaseError;

/// Ordered schema migrations. Each runs once, in a transaction.
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_diagnoses.sql"),
)];

/// Open the database at `path`, creating and migrating it as needed.
///
/// `:memory:` is accepted and yields a private in-memory database.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    prepare(Connection::open(path)?)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(conn: Connection) -> Result<Connection, DatabaseError> {
    conn.pragma_update(None, "foreign_keys", true)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Apply every migration newer than the stored schema version.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current = get_current_version(conn)?;

    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        tracing::info!(version, "Applying schema migration");
        conn.execute_batch(&format!("BEGIN;\n{sql}\nCOMMIT;"))
            .map_err(|e| {
                let _ = conn.execute_batch("ROLLBACK;");
                DatabaseError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                }
            })?;
    }

    Ok(())
}

/// Stored schema version, 0 for a fresh database.
pub fn get_current_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(0);
    }

    let version: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_diagnoses_table() {
        let conn = open_memory_database().unwrap();
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='diagnoses')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists);
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn fresh_connection_reports_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_current_version(&conn).unwrap(), 0);
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let on: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        let result = run_migrations(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn urgency_check_constraint_enforced() {
        let conn = open_memory_database().unwrap();
        let result = conn.execute(
            "INSERT INTO diagnoses (id, symptoms, gender, duration, city, scheme, insurance,
             result, urgency, status, created_at)
             VALUES ('x', 's', 'g', 'd', 'c', 's', 'i', '{}', 'Severe', 'Completed', '2024-01-01')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn file_database_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.db");
        {
            let conn = open_database(&path).unwrap();
            conn.execute(
                "INSERT INTO diagnoses (id, symptoms, gender, duration, city, scheme, insurance,
                 result, urgency, status, created_at)
                 VALUES ('a', 's', 'g', 'd', 'c', 's', 'i', '{}', 'Low', 'Completed', '2024-01-01')",
                [],
            )
            .unwrap();
        }
        let conn = open_database(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM diagnoses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
