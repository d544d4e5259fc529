//! Diagnosis log storage.
//!
//! `DiagnosisStore` is the seam the request handlers depend on. The SQLite
//! implementation serializes access through a single connection; the
//! engine handles everything else.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use super::repository::{
    count_diagnoses, count_diagnoses_by_urgency, insert_diagnosis, list_recent_diagnoses,
};
use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::models::{DiagnosisRecord, Urgency};

/// Append-only diagnosis log (allows mocking).
pub trait DiagnosisStore: Send + Sync {
    fn insert(&self, record: &DiagnosisRecord) -> Result<(), DatabaseError>;

    fn recent(&self, limit: usize) -> Result<Vec<DiagnosisRecord>, DatabaseError>;

    fn count(&self) -> Result<u64, DatabaseError>;

    fn count_by_urgency(&self, urgency: Urgency) -> Result<u64, DatabaseError>;

    /// Cheap liveness check for the health endpoint.
    fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct SqliteDiagnosisStore {
    conn: Mutex<Connection>,
}

impl SqliteDiagnosisStore {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: Mutex::new(open_database(path)?),
        })
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: Mutex::new(open_memory_database()?),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }
}

impl DiagnosisStore for SqliteDiagnosisStore {
    fn insert(&self, record: &DiagnosisRecord) -> Result<(), DatabaseError> {
        let conn = self.lock()?;
        insert_diagnosis(&conn, record)
    }

    fn recent(&self, limit: usize) -> Result<Vec<DiagnosisRecord>, DatabaseError> {
        let conn = self.lock()?;
        list_recent_diagnoses(&conn, limit)
    }

    fn count(&self) -> Result<u64, DatabaseError> {
        let conn = self.lock()?;
        count_diagnoses(&conn)
    }

    fn count_by_urgency(&self, urgency: Urgency) -> Result<u64, DatabaseError> {
        let conn = self.lock()?;
        count_diagnoses_by_urgency(&conn, urgency)
    }

    fn ping(&self) -> Result<(), DatabaseError> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

/// Store whose every operation fails, standing in for an unreachable database.
#[cfg(test)]
pub struct UnavailableStore;

#[cfg(test)]
fn unreachable_error() -> DatabaseError {
    DatabaseError::Sqlite(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
        Some("database unreachable".into()),
    ))
}

#[cfg(test)]
impl DiagnosisStore for UnavailableStore {
    fn insert(&self, _record: &DiagnosisRecord) -> Result<(), DatabaseError> {
        Err(unreachable_error())
    }

    fn recent(&self, _limit: usize) -> Result<Vec<DiagnosisRecord>, DatabaseError> {
        Err(unreachable_error())
    }

    fn count(&self) -> Result<u64, DatabaseError> {
        Err(unreachable_error())
    }

    fn count_by_urgency(&self, _urgency: Urgency) -> Result<u64, DatabaseError> {
        Err(unreachable_error())
    }

    fn ping(&self) -> Result<(), DatabaseError> {
        Err(unreachable_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Demographics;

    fn sample(urgency: Urgency) -> DiagnosisRecord {
        DiagnosisRecord::new(
            "persistent cough",
            &Demographics::default(),
            serde_json::json!({"urgency_level": urgency.as_str()}),
            urgency,
            Some("Pulmonologist".into()),
        )
    }

    #[test]
    fn sqlite_store_insert_and_query() {
        let store = SqliteDiagnosisStore::open_in_memory().unwrap();
        store.insert(&sample(Urgency::High)).unwrap();
        store.insert(&sample(Urgency::Low)).unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.count_by_urgency(Urgency::High).unwrap(), 1);
        assert_eq!(store.recent(100).unwrap().len(), 2);
    }

    #[test]
    fn sqlite_store_ping() {
        let store = SqliteDiagnosisStore::open_in_memory().unwrap();
        assert!(store.ping().is_ok());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let store = SqliteDiagnosisStore::open_in_memory().unwrap();
        let record = sample(Urgency::Medium);
        store.insert(&record).unwrap();
        assert!(store.insert(&record).is_err());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn unavailable_store_fails_everything() {
        let store = UnavailableStore;
        assert!(store.insert(&sample(Urgency::Low)).is_err());
        assert!(store.count().is_err());
        assert!(store.ping().is_err());
    }

    #[test]
    fn unavailable_store_reports_cantopen() {
        match UnavailableStore.count() {
            Err(DatabaseError::Sqlite(rusqlite::Error::SqliteFailure(e, _))) => {
                assert_eq!(e.code, rusqlite::ErrorCode::CannotOpen);
            }
            other => panic!("expected CANTOPEN, got {other:?}"),
        }
    }

    #[test]
    fn store_is_usable_across_threads() {
        let store = std::sync::Arc::new(SqliteDiagnosisStore::open_in_memory().unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let urgency = if i % 2 == 0 { Urgency::High } else { Urgency::Low };
                    store.insert(&sample(urgency)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.count().unwrap(), 4);
        assert_eq!(store.count_by_urgency(Urgency::High).unwrap(), 2);
        assert!(store.ping().is_ok());
    }
}
