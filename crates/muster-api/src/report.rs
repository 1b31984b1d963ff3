//! Handlers for `/attendance` read endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/attendance?from=&to=` | Inclusive day range; optional `identity_id` |
//! | `GET`  | `/attendance/{identity_id}/{day}` | 404 if no record for that day |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use muster_core::{
  clock::{Clock, DayKey},
  report::AttendanceEntry,
  store::{AttendanceStore, ReportQuery},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Range report ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RangeParams {
  pub from:        DayKey,
  pub to:          DayKey,
  pub identity_id: Option<Uuid>,
}

/// `GET /attendance?from=<day>&to=<day>[&identity_id=<uuid>]`
pub async fn list<S, C>(
  State(state): State<ApiState<S, C>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<AttendanceEntry>>, ApiError>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  if params.from > params.to {
    return Err(ApiError::BadRequest(format!(
      "empty day range: {} is after {}",
      params.from, params.to
    )));
  }

  let records = state
    .store
    .list_punches(&ReportQuery {
      from:        params.from,
      to:          params.to,
      identity_id: params.identity_id,
    })
    .await
    .map_err(ApiError::store)?;

  Ok(Json(records.into_iter().map(AttendanceEntry::from).collect()))
}

// ─── Single day ───────────────────────────────────────────────────────────────

/// `GET /attendance/{identity_id}/{day}`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path((identity_id, day)): Path<(Uuid, DayKey)>,
) -> Result<Json<AttendanceEntry>, ApiError>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  let record = state
    .store
    .find_punch(identity_id, day)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no punch record for {identity_id} on {day}"))
    })?;
  Ok(Json(AttendanceEntry::from(record)))
}
