//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, days as ISO `YYYY-MM-DD`,
//! UUIDs as hyphenated lowercase strings, roles as lowercase tokens.

use chrono::{DateTime, NaiveDate, Utc};
use muster_core::{
  clock::DayKey,
  identity::{Identity, Role},
  punch::PunchRecord,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── DayKey ──────────────────────────────────────────────────────────────────

pub fn encode_day(day: DayKey) -> String { day.to_string() }

pub fn decode_day(s: &str) -> Result<DayKey> {
  s.parse::<NaiveDate>()
    .map(DayKey::from_date)
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str {
  match r {
    Role::Student => "student",
    Role::Faculty => "faculty",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "student" => Ok(Role::Student),
    "faculty" => Ok(Role::Faculty),
    other => Err(Error::UnknownRole(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `identities` row.
pub struct RawIdentity {
  pub identity_id:    String,
  pub display_name:   String,
  pub role:           String,
  pub enrollment_ref: Option<String>,
  pub created_at:     String,
}

impl RawIdentity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      identity_id:    row.get(0)?,
      display_name:   row.get(1)?,
      role:           row.get(2)?,
      enrollment_ref: row.get(3)?,
      created_at:     row.get(4)?,
    })
  }

  pub fn into_identity(self) -> Result<Identity> {
    Ok(Identity {
      identity_id:    decode_uuid(&self.identity_id)?,
      display_name:   self.display_name,
      role:           decode_role(&self.role)?,
      enrollment_ref: self.enrollment_ref,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `punches` row.
pub struct RawPunch {
  pub identity_id:  String,
  pub day:          String,
  pub punch_in_at:  String,
  pub punch_out_at: Option<String>,
  pub display_name: String,
  pub display_role: String,
}

impl RawPunch {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      identity_id:  row.get(0)?,
      day:          row.get(1)?,
      punch_in_at:  row.get(2)?,
      punch_out_at: row.get(3)?,
      display_name: row.get(4)?,
      display_role: row.get(5)?,
    })
  }

  pub fn into_punch(self) -> Result<PunchRecord> {
    Ok(PunchRecord {
      identity_id:  decode_uuid(&self.identity_id)?,
      day:          decode_day(&self.day)?,
      punch_in_at:  decode_dt(&self.punch_in_at)?,
      punch_out_at: self.punch_out_at.as_deref().map(decode_dt).transpose()?,
      display_name: self.display_name,
      display_role: decode_role(&self.display_role)?,
    })
  }
}
