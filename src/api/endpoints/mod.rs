//! API endpoint handlers.
//!
//! Handlers parse the wire format and delegate to the domain modules.

pub mod admin;
pub mod diagnosis;
pub mod health;
pub mod hospitals;

use crate::api::error::ApiError;
use crate::db::DatabaseError;

/// Run a store call on the blocking pool.
///
/// The SQLite store holds a std `Mutex`; it must not be locked on an async
/// worker thread.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DatabaseError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_blocking_returns_value() {
        let value = run_blocking(|| Ok::<_, DatabaseError>(7)).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn run_blocking_maps_store_error_to_internal() {
        let err = run_blocking(|| Err::<(), _>(DatabaseError::LockPoisoned))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn run_blocking_maps_panic_to_internal() {
        let err = run_blocking(|| -> Result<(), DatabaseError> { panic!("boom") })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
