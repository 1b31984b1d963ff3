//! Handlers for `/identities` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/identities` | Optional `?role=student\|faculty` |
//! | `POST` | `/identities` | Body: `{"display_name":"...","role":"student"}` |
//! | `GET`  | `/identities/{id}` | 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use muster_core::{
  clock::Clock,
  identity::{Identity, NewIdentity, Role},
  store::AttendanceStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub role: Option<Role>,
}

/// `GET /identities[?role=<role>]`
pub async fn list<S, C>(
  State(state): State<ApiState<S, C>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Identity>>, ApiError>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  let identities = state
    .store
    .list_identities(params.role)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(identities))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub display_name:   String,
  pub role:           Role,
  pub enrollment_ref: Option<String>,
}

/// `POST /identities` — body: `{"display_name":"...","role":"student"}`
pub async fn create<S, C>(
  State(state): State<ApiState<S, C>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  let display_name = body.display_name.trim().to_owned();
  if display_name.is_empty() {
    return Err(ApiError::BadRequest(
      "display_name must not be empty".to_string(),
    ));
  }

  let identity = state
    .store
    .add_identity(NewIdentity {
      display_name,
      role: body.role,
      enrollment_ref: body.enrollment_ref,
    })
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(identity)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /identities/{id}`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Identity>, ApiError>
where
  S: AttendanceStore + 'static,
  C: Clock + 'static,
{
  let identity = state
    .store
    .get_identity(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("identity {id} not found")))?;
  Ok(Json(identity))
}
