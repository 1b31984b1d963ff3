//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use muster_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store is briefly unreachable; the client should retry the scan.
  #[error("temporarily unavailable: {0}")]
  Unavailable(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend error, keeping transient failures distinguishable so
  /// they surface as 503 rather than 500.
  pub fn store<E: StoreError>(e: E) -> Self {
    if e.is_transient() {
      ApiError::Unavailable(e.to_string())
    } else {
      ApiError::Store(Box::new(e))
    }
  }
}

impl From<muster_core::Error> for ApiError {
  fn from(e: muster_core::Error) -> Self {
    use muster_core::Error as E;
    match e {
      E::IdentityNotFound(id) => {
        ApiError::NotFound(format!("identity {id} not found"))
      }
      E::StoreUnavailable(source) => ApiError::Unavailable(source.to_string()),
      corrupt @ E::CorruptRecord { .. } => {
        ApiError::Internal(corrupt.to_string())
      }
      E::Store(source) => ApiError::Store(source),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
