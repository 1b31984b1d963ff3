//! Punch records and the outcomes of a punch attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{clock::DayKey, identity::Role};

/// The per-identity, per-day attendance record.
///
/// `punch_in_at` is written exactly once, when the row is created.
/// `punch_out_at` is written at most once, by the store's guarded update.
/// Nothing else ever mutates a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
  pub identity_id:  Uuid,
  pub day:          DayKey,
  pub punch_in_at:  DateTime<Utc>,
  pub punch_out_at: Option<DateTime<Utc>>,
  /// Snapshot of the identity at punch-in time, not a live join.
  pub display_name: String,
  pub display_role: Role,
}

impl PunchRecord {
  /// Whether the record has reached its terminal (punched-out) state.
  pub fn is_complete(&self) -> bool { self.punch_out_at.is_some() }
}

/// What a punch attempt did. `TooSoon` and `AlreadyPunchedOut` are
/// outcomes, not errors: the scan was understood, the state machine just
/// had nothing to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PunchOutcome {
  /// First scan of the day. A record was created.
  PunchedIn { record: PunchRecord },
  /// The record's punch-out is set, by this call or by a concurrent one
  /// that won the race. `record` reflects the single persisted timestamp
  /// either way.
  PunchedOut { record: PunchRecord },
  /// Scanned again within the cooldown window. Nothing was written.
  TooSoon {
    record:          PunchRecord,
    /// Whole seconds between punch-in and this attempt.
    elapsed_seconds: i64,
  },
  /// The record was already terminal. Nothing was written.
  AlreadyPunchedOut { record: PunchRecord },
}

impl PunchOutcome {
  /// The record as persisted after this attempt.
  pub fn record(&self) -> &PunchRecord {
    match self {
      Self::PunchedIn { record }
      | Self::PunchedOut { record }
      | Self::TooSoon { record, .. }
      | Self::AlreadyPunchedOut { record } => record,
    }
  }
}
