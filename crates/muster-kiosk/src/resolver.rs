//! Cloud-backed face identification client.
//!
//! The kiosk posts the captured frame to `{base_url}/v1/identify`; the
//! service answers with at most one candidate and a confidence score on a
//! 0-100 scale. Candidates under `min_confidence` count as no match, so a
//! blurry frame degrades to "nobody matched" rather than punching the wrong
//! person.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use muster_core::resolver::{IdentityResolver, ResolvedIdentity};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::ResolverConfig;

#[derive(Debug, Error)]
pub enum ResolverError {
  #[error("failed to build identify client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("identify request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("identify endpoint returned {0}")]
  Status(reqwest::StatusCode),
}

// ─── Wire format ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct IdentifyRequest<'a> {
  image_b64: &'a str,
}

#[derive(Deserialize)]
struct IdentifyResponse {
  candidate: Option<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  identity_id: Uuid,
  confidence:  f32,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// [`IdentityResolver`] backed by a remote identification API.
#[derive(Clone)]
pub struct CloudFaceResolver {
  client: reqwest::Client,
  config: ResolverConfig,
}

impl CloudFaceResolver {
  pub fn new(config: ResolverConfig) -> Result<Self, ResolverError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .map_err(ResolverError::Build)?;
    Ok(Self { client, config })
  }
}

impl IdentityResolver for CloudFaceResolver {
  type Error = ResolverError;

  async fn resolve(
    &self,
    image: &[u8],
  ) -> Result<Option<ResolvedIdentity>, ResolverError> {
    let image_b64 = B64.encode(image);
    let url =
      format!("{}/v1/identify", self.config.base_url.trim_end_matches('/'));

    let mut request = self.client.post(&url).json(&IdentifyRequest {
      image_b64: &image_b64,
    });
    if let Some(key) = &self.config.api_key {
      request = request.bearer_auth(key);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
      return Err(ResolverError::Status(response.status()));
    }

    let parsed: IdentifyResponse = response.json().await?;
    Ok(
      parsed
        .candidate
        .and_then(|c| accept(c, self.config.min_confidence)),
    )
  }
}

/// Apply the confidence threshold; the boundary is inclusive.
fn accept(
  candidate: Candidate,
  min_confidence: f32,
) -> Option<ResolvedIdentity> {
  if candidate.confidence < min_confidence {
    tracing::info!(
      identity_id = %candidate.identity_id,
      confidence = candidate.confidence,
      min_confidence,
      "discarding low-confidence match"
    );
    return None;
  }
  Some(ResolvedIdentity {
    identity_id: candidate.identity_id,
    confidence:  candidate.confidence,
  })
}
