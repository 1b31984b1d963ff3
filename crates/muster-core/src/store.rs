//! The `AttendanceStore` trait and supporting query types.
//!
//! Implemented by storage backends (`muster-store-sqlite` in this
//! workspace). The engine and the HTTP layers depend on this abstraction,
//! never on a concrete backend.
//!
//! # Concurrency contract
//!
//! The two conditional writes are the system's only synchronisation
//! mechanism. Calls racing on the same `(identity_id, day)` key must
//! serialise so that exactly one [`AttendanceStore::insert_if_absent`] and
//! at most one qualifying [`AttendanceStore::punch_out_if_open`] applies.
//! Calls on different keys are independent. A write, once issued, runs to
//! completion even if the calling future is dropped.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  clock::DayKey,
  identity::{Identity, NewIdentity, Role},
  punch::PunchRecord,
};

// ─── Error classification ────────────────────────────────────────────────────

/// Implemented by every backend error type so the engine can tell transient
/// infrastructure failures (worth retrying the whole operation) from
/// permanent ones.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_transient(&self) -> bool;
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Parameters for [`AttendanceStore::list_punches`].
#[derive(Debug, Clone)]
pub struct ReportQuery {
  /// First day of the range, inclusive.
  pub from:        DayKey,
  /// Last day of the range, inclusive.
  pub to:          DayKey,
  /// Restrict the report to a single identity.
  pub identity_id: Option<Uuid>,
}

// ─── Store trait ─────────────────────────────────────────────────────────────

pub trait AttendanceStore: Send + Sync {
  type Error: StoreError;

  // ── Identities ──────────────────────────────────────────────────────────

  /// Register a new identity. The store assigns the id and `created_at`.
  fn add_identity(
    &self,
    input: NewIdentity,
  ) -> impl Future<Output = Result<Identity, Self::Error>> + Send + '_;

  /// Retrieve an identity by id.
  fn get_identity(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  /// List registered identities, optionally filtered by role, ordered by
  /// display name.
  fn list_identities(
    &self,
    role: Option<Role>,
  ) -> impl Future<Output = Result<Vec<Identity>, Self::Error>> + Send + '_;

  // ── Punch records, conditional writes ───────────────────────────────────

  /// Create `record` iff no record exists for its `(identity_id, day)`.
  ///
  /// Returns the record as stored (the pre-existing one when nothing was
  /// inserted) and whether this call performed the insert. Must be a single
  /// atomic step: of any number of concurrent calls for the same key,
  /// exactly one reports `true`.
  fn insert_if_absent(
    &self,
    record: PunchRecord,
  ) -> impl Future<Output = Result<(PunchRecord, bool), Self::Error>> + Send + '_;

  /// Set `punch_out_at = at` for the key iff it is still unset.
  ///
  /// Returns the record as persisted after the attempt and whether this
  /// call's update applied. Of any number of concurrent calls for the same
  /// key, at most one reports `true`; the rest observe the winner's record.
  fn punch_out_if_open(
    &self,
    identity_id: Uuid,
    day: DayKey,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(PunchRecord, bool), Self::Error>> + Send + '_;

  // ── Reads ───────────────────────────────────────────────────────────────

  /// The record for `(identity_id, day)`, if any.
  fn find_punch(
    &self,
    identity_id: Uuid,
    day: DayKey,
  ) -> impl Future<Output = Result<Option<PunchRecord>, Self::Error>> + Send + '_;

  /// All records in the query's day range, ordered by day then punch-in.
  fn list_punches<'a>(
    &'a self,
    query: &'a ReportQuery,
  ) -> impl Future<Output = Result<Vec<PunchRecord>, Self::Error>> + Send + 'a;
}
