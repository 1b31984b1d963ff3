//! [`SqliteStore`] — the SQLite implementation of [`AttendanceStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use muster_core::{
  clock::DayKey,
  identity::{Identity, NewIdentity, Role},
  punch::PunchRecord,
  store::{AttendanceStore, ReportQuery},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawIdentity, RawPunch, encode_day, encode_dt, encode_role, encode_uuid},
  schema::SCHEMA,
};

const PUNCH_COLUMNS: &str =
  "identity_id, day, punch_in_at, punch_out_at, display_name, display_role";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A muster attendance store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// funnel through the connection's worker thread, which serialises them:
/// a conditional write and its re-read inside one closure are a single
/// atomic step with respect to every other store call.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AttendanceStore impl ────────────────────────────────────────────────────

impl AttendanceStore for SqliteStore {
  type Error = Error;

  // ── Identities ────────────────────────────────────────────────────────────

  async fn add_identity(&self, input: NewIdentity) -> Result<Identity> {
    let identity = Identity {
      identity_id:    Uuid::new_v4(),
      display_name:   input.display_name,
      role:           input.role,
      enrollment_ref: input.enrollment_ref,
      created_at:     Utc::now(),
    };

    let id_str   = encode_uuid(identity.identity_id);
    let name     = identity.display_name.clone();
    let role_str = encode_role(identity.role).to_owned();
    let enr_ref  = identity.enrollment_ref.clone();
    let at_str   = encode_dt(identity.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO identities (identity_id, display_name, role, enrollment_ref, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, role_str, enr_ref, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(identity)
  }

  async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT identity_id, display_name, role, enrollment_ref, created_at
             FROM identities WHERE identity_id = ?1",
            rusqlite::params![id_str],
            RawIdentity::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  async fn list_identities(&self, role: Option<Role>) -> Result<Vec<Identity>> {
    let role_str = role.map(encode_role).map(str::to_owned);

    let raws: Vec<RawIdentity> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(r) = role_str {
          let mut stmt = conn.prepare(
            "SELECT identity_id, display_name, role, enrollment_ref, created_at
             FROM identities WHERE role = ?1 ORDER BY display_name",
          )?;
          stmt
            .query_map(rusqlite::params![r], RawIdentity::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT identity_id, display_name, role, enrollment_ref, created_at
             FROM identities ORDER BY display_name",
          )?;
          stmt
            .query_map([], RawIdentity::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIdentity::into_identity).collect()
  }

  // ── Punch records — conditional writes ────────────────────────────────────

  async fn insert_if_absent(
    &self,
    record: PunchRecord,
  ) -> Result<(PunchRecord, bool)> {
    let id_str    = encode_uuid(record.identity_id);
    let day_str   = encode_day(record.day);
    let in_str    = encode_dt(record.punch_in_at);
    let out_str   = record.punch_out_at.map(encode_dt);
    let name      = record.display_name;
    let role_str  = encode_role(record.display_role).to_owned();

    let (raw, inserted): (RawPunch, bool) = self
      .conn
      .call(move |conn| {
        // The insert attempt and the re-read run back to back on the
        // connection's worker thread: no other store call can interleave,
        // so of any number of racers exactly one sees `n == 1` and all of
        // them read the same surviving row.
        let n = conn.execute(
          &format!(
            "INSERT INTO punches ({PUNCH_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(identity_id, day) DO NOTHING"
          ),
          rusqlite::params![id_str, day_str, in_str, out_str, name, role_str],
        )?;

        let raw = conn.query_row(
          &format!(
            "SELECT {PUNCH_COLUMNS} FROM punches
             WHERE identity_id = ?1 AND day = ?2"
          ),
          rusqlite::params![id_str, day_str],
          RawPunch::from_row,
        )?;

        Ok((raw, n == 1))
      })
      .await?;

    Ok((raw.into_punch()?, inserted))
  }

  async fn punch_out_if_open(
    &self,
    identity_id: Uuid,
    day: DayKey,
    at: DateTime<Utc>,
  ) -> Result<(PunchRecord, bool)> {
    let id_str  = encode_uuid(identity_id);
    let day_str = encode_day(day);
    let at_str  = encode_dt(at);

    let (raw, applied): (Option<RawPunch>, bool) = self
      .conn
      .call(move |conn| {
        // Guarded update plus re-read as one atomic step. The NULL guard
        // means at most one concurrent caller's update takes effect; every
        // caller then reads the row the winner left behind.
        let n = conn.execute(
          "UPDATE punches SET punch_out_at = ?3
           WHERE identity_id = ?1 AND day = ?2 AND punch_out_at IS NULL",
          rusqlite::params![id_str, day_str, at_str],
        )?;

        let raw = conn
          .query_row(
            &format!(
              "SELECT {PUNCH_COLUMNS} FROM punches
               WHERE identity_id = ?1 AND day = ?2"
            ),
            rusqlite::params![id_str, day_str],
            RawPunch::from_row,
          )
          .optional()?;

        Ok((raw, n == 1))
      })
      .await?;

    let raw = raw.ok_or(Error::RecordVanished { identity_id, day })?;
    Ok((raw.into_punch()?, applied))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_punch(
    &self,
    identity_id: Uuid,
    day: DayKey,
  ) -> Result<Option<PunchRecord>> {
    let id_str  = encode_uuid(identity_id);
    let day_str = encode_day(day);

    let raw: Option<RawPunch> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {PUNCH_COLUMNS} FROM punches
               WHERE identity_id = ?1 AND day = ?2"
            ),
            rusqlite::params![id_str, day_str],
            RawPunch::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPunch::into_punch).transpose()
  }

  async fn list_punches(&self, query: &ReportQuery) -> Result<Vec<PunchRecord>> {
    let from_str = encode_day(query.from);
    let to_str   = encode_day(query.to);
    let id_str   = query.identity_id.map(encode_uuid);

    let raws: Vec<RawPunch> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(id) = id_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {PUNCH_COLUMNS} FROM punches
             WHERE day >= ?1 AND day <= ?2 AND identity_id = ?3
             ORDER BY day, punch_in_at"
          ))?;
          stmt
            .query_map(rusqlite::params![from_str, to_str, id], RawPunch::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {PUNCH_COLUMNS} FROM punches
             WHERE day >= ?1 AND day <= ?2
             ORDER BY day, punch_in_at"
          ))?;
          stmt
            .query_map(rusqlite::params![from_str, to_str], RawPunch::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPunch::into_punch).collect()
  }
}
