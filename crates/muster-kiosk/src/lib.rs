//! HTTP layer of the muster attendance kiosk.
//!
//! Exposes an axum [`Router`] with the camera-facing `POST /scan` endpoint
//! and the operator API from `muster-api` mounted under `/api`. The binary
//! in `main.rs` wires this router to a TCP listener; tests drive it with
//! `tower::ServiceExt::oneshot`.

pub mod error;
pub mod resolver;
pub mod scan;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::post};
use chrono::{FixedOffset, TimeDelta};
use muster_api::ApiState;
use muster_core::{
  clock::Clock, engine::PunchEngine, resolver::IdentityResolver,
  store::AttendanceStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Fixed UTC offset the site reckons attendance days in, e.g. `"+05:30"`.
  #[serde(default = "default_utc_offset")]
  pub utc_offset:       String,
  /// Seconds a record must stay open before a second scan punches out.
  #[serde(default = "default_cooldown_seconds")]
  pub cooldown_seconds: u32,
  pub resolver:         ResolverConfig,
}

/// Settings for the external face identification service.
#[derive(Deserialize, Clone)]
pub struct ResolverConfig {
  pub base_url:       String,
  pub api_key:        Option<String>,
  /// Minimum confidence (0-100 scale) to accept a match.
  #[serde(default = "default_min_confidence")]
  pub min_confidence: f32,
}

fn default_utc_offset() -> String { "+00:00".to_string() }

fn default_cooldown_seconds() -> u32 { 60 }

fn default_min_confidence() -> f32 { 85.0 }

impl ServerConfig {
  /// Parse the configured UTC offset.
  pub fn zone(&self) -> Result<FixedOffset, chrono::ParseError> {
    self.utc_offset.parse()
  }

  pub fn cooldown(&self) -> TimeDelta {
    TimeDelta::seconds(i64::from(self.cooldown_seconds))
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all kiosk handlers.
pub struct AppState<S, C, R> {
  pub engine:   Arc<PunchEngine<S, C>>,
  pub store:    Arc<S>,
  pub resolver: Arc<R>,
}

impl<S, C, R> Clone for AppState<S, C, R> {
  fn clone(&self) -> Self {
    Self {
      engine:   Arc::clone(&self.engine),
      store:    Arc::clone(&self.store),
      resolver: Arc::clone(&self.resolver),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the kiosk [`Router`]: `POST /scan` plus the operator API under
/// `/api`.
pub fn router<S, C, R>(state: AppState<S, C, R>) -> Router
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
  R: IdentityResolver + 'static,
{
  let api = muster_api::api_router(ApiState {
    engine: Arc::clone(&state.engine),
    store:  Arc::clone(&state.store),
  });

  Router::new()
    .route("/scan", post(scan::scan::<S, C, R>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
