//! Error types for `muster-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::clock::DayKey;

/// Errors produced by the punch engine. `TooSoon` and `AlreadyPunchedOut`
/// are *outcomes* of a punch, not errors, and live in
/// [`crate::punch::PunchOutcome`] instead.
#[derive(Debug, Error)]
pub enum Error {
  /// The scanned identity is not registered. Nothing was written.
  #[error("identity not found: {0}")]
  IdentityNotFound(Uuid),

  /// A stored record violates the punch invariants. The engine never
  /// repairs such a row; an operator has to look at it.
  #[error("corrupt punch record for identity {identity_id} on {day}: {detail}")]
  CorruptRecord {
    identity_id: Uuid,
    day:         DayKey,
    detail:      String,
  },

  /// Transient store failure. Retrying the whole punch operation is safe:
  /// every write is conditional on stored state, so a retry can never
  /// double-apply.
  #[error("attendance store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Permanent store failure.
  #[error("attendance store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
