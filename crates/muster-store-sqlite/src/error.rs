//! Error type for `muster-store-sqlite`.

use muster_core::{clock::DayKey, store::StoreError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  /// A punch row the in-flight operation depends on is gone. Rows are never
  /// deleted, so this means the database file was damaged or tampered with.
  #[error("punch record for identity {identity_id} on {day} vanished")]
  RecordVanished { identity_id: Uuid, day: DayKey },
}

impl StoreError for Error {
  /// `SQLITE_BUSY` and `SQLITE_LOCKED` are contention outcomes; the same
  /// operation retried gets a fresh chance. Everything else is permanent.
  fn is_transient(&self) -> bool {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(e, _),
      )) => matches!(
        e.code,
        rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
      ),
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
