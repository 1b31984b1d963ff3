//! Kiosk error type and its HTTP rendering.
//!
//! Punch errors delegate to [`muster_api::ApiError`] so `/scan` and the
//! mounted API report identical statuses for the same failure.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use muster_api::ApiError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The resolver answered, but nobody matched.
  #[error("no enrolled identity matched the captured face")]
  NoMatch,

  /// The resolver itself failed; the punch state machine never ran.
  #[error("face resolver failed: {0}")]
  Resolver(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error(transparent)]
  Punch(#[from] muster_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      Error::Punch(e) => return ApiError::from(e).into_response(),
      Error::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      Error::NoMatch => (
        StatusCode::NOT_FOUND,
        "no enrolled identity matched the captured face".to_string(),
      ),
      Error::Resolver(e) => {
        (StatusCode::BAD_GATEWAY, format!("face resolver failed: {e}"))
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
