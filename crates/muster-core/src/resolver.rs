//! The identity-resolver seam.
//!
//! Face matching is an external capability: something takes an image and
//! answers "this is probably identity X" or "nobody I know". The core only
//! consumes this interface; `muster-kiosk` ships the cloud-backed
//! implementation and tests use stubs.

use std::future::Future;

use uuid::Uuid;

/// A match returned by a resolver, already past the implementation's own
/// confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedIdentity {
  pub identity_id: Uuid,
  /// Match confidence on a 0-100 scale, as reported by the matcher.
  pub confidence:  f32,
}

/// Matches a captured image against the enrolled population.
///
/// `Ok(None)` means nobody matched (or nobody matched confidently enough).
/// `Err` means the matching service itself failed; the request fails before
/// the punch state machine is ever invoked.
pub trait IdentityResolver: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn resolve<'a>(
    &'a self,
    image: &'a [u8],
  ) -> impl Future<Output = Result<Option<ResolvedIdentity>, Self::Error>> + Send + 'a;
}
