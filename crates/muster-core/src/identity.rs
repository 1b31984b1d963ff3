//! Identity — a registered person eligible to punch attendance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role a registered person holds on site.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Faculty,
}

/// A registered person.
///
/// Rows are immutable after creation. Biometric re-enrollment happens
/// inside the resolver subsystem and only affects what `enrollment_ref`
/// points at, never this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
  pub identity_id:    Uuid,
  pub display_name:   String,
  pub role:           Role,
  /// Opaque reference to the biometric enrollment owned by the identity
  /// resolver (for the cloud resolver, its person id). The core never
  /// interprets it.
  pub enrollment_ref: Option<String>,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::AttendanceStore::add_identity`]. The store
/// assigns `identity_id` and `created_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIdentity {
  pub display_name:   String,
  pub role:           Role,
  pub enrollment_ref: Option<String>,
}
