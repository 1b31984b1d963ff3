//! JSON REST API for muster.
//!
//! Exposes an axum [`Router`] over any [`AttendanceStore`] plus the punch
//! engine built on top of it:
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | `/punches` | Run the punch state machine for an identity |
//! | `GET`  | `/identities` | List identities, optional role filter |
//! | `POST` | `/identities` | Register an identity |
//! | `GET`  | `/identities/{id}` | Fetch one identity |
//! | `GET`  | `/attendance` | Day-range attendance report |
//! | `GET`  | `/attendance/{identity_id}/{day}` | One identity's day |
//!
//! Transport concerns (listening, request tracing, the camera scan flow)
//! belong to the caller; `muster-kiosk` mounts this router under `/api`.

pub mod error;
pub mod identities;
pub mod punches;
pub mod report;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use muster_core::{clock::Clock, engine::PunchEngine, store::AttendanceStore};

pub use crate::error::ApiError;

/// Shared state handed to every API handler.
pub struct ApiState<S, C> {
  pub engine: Arc<PunchEngine<S, C>>,
  pub store:  Arc<S>,
}

impl<S, C> Clone for ApiState<S, C> {
  fn clone(&self) -> Self {
    Self {
      engine: Arc::clone(&self.engine),
      store:  Arc::clone(&self.store),
    }
  }
}

/// Build the API router with all routes attached.
pub fn api_router<S, C>(state: ApiState<S, C>) -> Router<()>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  Router::new()
    .route("/punches", post(punches::record::<S, C>))
    .route(
      "/identities",
      get(identities::list::<S, C>).post(identities::create::<S, C>),
    )
    .route("/identities/{id}", get(identities::get_one::<S, C>))
    .route("/attendance", get(report::list::<S, C>))
    .route(
      "/attendance/{identity_id}/{day}",
      get(report::get_one::<S, C>),
    )
    .with_state(state)
}
