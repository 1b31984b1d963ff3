//! Handler for the `/punches` endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/punches` | Body: `{"identity_id":"<uuid>"}`; every understood scan returns 200 with a tagged outcome |

use axum::{Json, extract::State};
use chrono::{FixedOffset, TimeDelta};
use muster_core::{clock::Clock, punch::PunchOutcome, store::AttendanceStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct PunchBody {
  pub identity_id: Uuid,
}

/// A punch result: the tagged outcome plus a display-ready message for the
/// kiosk screen.
#[derive(Debug, Serialize)]
pub struct PunchResponse {
  #[serde(flatten)]
  pub outcome: PunchOutcome,
  pub message: String,
}

/// `POST /punches` — body: `{"identity_id":"<uuid>"}`
pub async fn record<S, C>(
  State(state): State<ApiState<S, C>>,
  Json(body): Json<PunchBody>,
) -> Result<Json<PunchResponse>, ApiError>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  let outcome = state.engine.record_punch(body.identity_id).await?;
  let message = describe(
    &outcome,
    state.engine.calendar().zone(),
    state.engine.cooldown(),
  );
  Ok(Json(PunchResponse { outcome, message }))
}

/// One-line summary of an outcome, timestamps rendered in site-local time.
pub fn describe(
  outcome: &PunchOutcome,
  zone: FixedOffset,
  cooldown: TimeDelta,
) -> String {
  match outcome {
    PunchOutcome::PunchedIn { record } => format!(
      "Welcome, {}. Punched in at {}.",
      record.display_name,
      record.punch_in_at.with_timezone(&zone).format("%H:%M:%S"),
    ),
    PunchOutcome::PunchedOut { record } => {
      let out = record.punch_out_at.unwrap_or(record.punch_in_at);
      format!(
        "Goodbye, {}. Punched out at {}.",
        record.display_name,
        out.with_timezone(&zone).format("%H:%M:%S"),
      )
    }
    PunchOutcome::TooSoon {
      record,
      elapsed_seconds,
    } => format!(
      "{} punched in {}s ago; punch-out opens after {}s.",
      record.display_name,
      elapsed_seconds,
      cooldown.num_seconds(),
    ),
    PunchOutcome::AlreadyPunchedOut { record } => format!(
      "{} already completed attendance for {}.",
      record.display_name, record.day,
    ),
  }
}
