//! Read-only projections of punch records for reporting.

use serde::Serialize;

use crate::punch::PunchRecord;

/// A punch record plus its derived duration. Computed at read time, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceEntry {
  #[serde(flatten)]
  pub record:           PunchRecord,
  /// `punch_out_at - punch_in_at`, in whole seconds. Absent while the
  /// record is still open.
  pub duration_seconds: Option<i64>,
}

impl From<PunchRecord> for AttendanceEntry {
  fn from(record: PunchRecord) -> Self {
    let duration_seconds = record
      .punch_out_at
      .map(|out| (out - record.punch_in_at).num_seconds());
    Self {
      record,
      duration_seconds,
    }
  }
}
