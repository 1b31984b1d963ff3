//! Handler for the camera-facing `/scan` endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/scan` | Body: `{"image_b64":"..."}`; resolves the face, then runs the punch state machine |

use axum::{Json, extract::State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use muster_api::punches::{PunchResponse, describe};
use muster_core::{
  clock::Clock, resolver::IdentityResolver, store::AttendanceStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
pub struct ScanBody {
  /// Captured camera frame, base64 (standard alphabet).
  pub image_b64: String,
}

/// A scan result: the punch response plus the resolver's confidence in the
/// match that triggered it.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
  pub confidence: f32,
  #[serde(flatten)]
  pub punch:      PunchResponse,
}

/// `POST /scan` — body: `{"image_b64":"<frame>"}`
pub async fn scan<S, C, R>(
  State(state): State<AppState<S, C, R>>,
  Json(body): Json<ScanBody>,
) -> Result<Json<ScanResponse>, Error>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
  R: IdentityResolver + 'static,
{
  let image = B64.decode(&body.image_b64).map_err(|e| {
    Error::BadRequest(format!("image_b64 is not valid base64: {e}"))
  })?;

  let resolved = state
    .resolver
    .resolve(&image)
    .await
    .map_err(|e| Error::Resolver(Box::new(e)))?;

  let Some(resolved) = resolved else {
    tracing::info!(image_bytes = image.len(), "scan matched nobody");
    return Err(Error::NoMatch);
  };

  tracing::info!(
    identity_id = %resolved.identity_id,
    confidence = resolved.confidence,
    "scan matched an enrolled identity"
  );

  let outcome = state.engine.record_punch(resolved.identity_id).await?;
  let message = describe(
    &outcome,
    state.engine.calendar().zone(),
    state.engine.cooldown(),
  );

  Ok(Json(ScanResponse {
    confidence: resolved.confidence,
    punch:      PunchResponse { outcome, message },
  }))
}
