//! The punch state machine.
//!
//! [`PunchEngine::record_punch`] is the only write path into attendance
//! records. It holds no locks; every write it issues is conditional on
//! stored state, and the store's two conditional primitives are the only
//! synchronisation mechanism. Any number of concurrent punches for the same
//! identity converge on the same stored record.

use std::sync::Arc;

use chrono::TimeDelta;
use uuid::Uuid;

use crate::{
  clock::{Calendar, Clock, SystemClock},
  error::{Error, Result},
  punch::{PunchOutcome, PunchRecord},
  store::{AttendanceStore, StoreError},
};

/// How many times `record_punch` restarts after a transient store failure
/// before giving up.
const TRANSIENT_RETRY_LIMIT: u32 = 2;

/// The attendance punch engine.
///
/// Constructed once at startup and shared behind an `Arc` by every request
/// handler.
pub struct PunchEngine<S, C = SystemClock> {
  store:    Arc<S>,
  calendar: Calendar<C>,
  cooldown: TimeDelta,
}

impl<S, C> PunchEngine<S, C>
where
  S: AttendanceStore,
  C: Clock,
{
  pub fn new(store: Arc<S>, calendar: Calendar<C>, cooldown: TimeDelta) -> Self {
    Self {
      store,
      calendar,
      cooldown,
    }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn calendar(&self) -> &Calendar<C> { &self.calendar }

  /// Minimum time between punch-in and an accepted punch-out. The boundary
  /// is inclusive: a scan exactly `cooldown` after punch-in punches out.
  pub fn cooldown(&self) -> TimeDelta { self.cooldown }

  /// Record a punch for `identity_id` at the current instant.
  ///
  /// The first successful call on a day punches in. The first call at least
  /// the cooldown after that punches out. Calls in between are
  /// [`PunchOutcome::TooSoon`]; calls after are
  /// [`PunchOutcome::AlreadyPunchedOut`]. At most one store write happens
  /// per call.
  ///
  /// A transient store failure restarts the whole operation, up to
  /// [`TRANSIENT_RETRY_LIMIT`] extra attempts. Each attempt re-reads the
  /// clock and re-evaluates against stored state, so a restart can never
  /// double-apply a write.
  pub async fn record_punch(&self, identity_id: Uuid) -> Result<PunchOutcome> {
    let mut attempts = 0;
    loop {
      match self.punch_once(identity_id).await {
        Err(Error::StoreUnavailable(source))
          if attempts < TRANSIENT_RETRY_LIMIT =>
        {
          attempts += 1;
          tracing::warn!(
            %identity_id,
            attempts,
            error = %source,
            "transient store failure, retrying punch"
          );
        }
        other => return other,
      }
    }
  }

  async fn punch_once(&self, identity_id: Uuid) -> Result<PunchOutcome> {
    let identity = self
      .store
      .get_identity(identity_id)
      .await
      .map_err(classify)?
      .ok_or(Error::IdentityNotFound(identity_id))?;

    // One observation per attempt. The day key, the cooldown check, and
    // any timestamp written below all come from this instant.
    let obs = self.calendar.observe();

    let candidate = PunchRecord {
      identity_id,
      day: obs.day,
      punch_in_at: obs.now,
      punch_out_at: None,
      display_name: identity.display_name,
      display_role: identity.role,
    };

    let (stored, inserted) = self
      .store
      .insert_if_absent(candidate)
      .await
      .map_err(classify)?;

    if inserted {
      tracing::info!(%identity_id, day = %stored.day, "punched in");
      return Ok(PunchOutcome::PunchedIn { record: stored });
    }

    // A record already existed; `stored` is the row as persisted.
    let current = stored;

    if let Some(out_at) = current.punch_out_at {
      if out_at <= current.punch_in_at {
        return Err(Error::CorruptRecord {
          identity_id,
          day:    current.day,
          detail: format!(
            "punch_out_at {out_at} is not after punch_in_at {}",
            current.punch_in_at
          ),
        });
      }
      tracing::info!(%identity_id, day = %current.day, "already punched out");
      return Ok(PunchOutcome::AlreadyPunchedOut { record: current });
    }

    let elapsed = obs.now - current.punch_in_at;
    if elapsed < self.cooldown {
      let elapsed_seconds = elapsed.num_seconds();
      tracing::info!(%identity_id, elapsed_seconds, "scan within cooldown");
      return Ok(PunchOutcome::TooSoon {
        elapsed_seconds,
        record: current,
      });
    }

    // Cooldown satisfied. Attempt the close; the `punch_out_at` still
    // unset guard means exactly one concurrent caller wins.
    let (updated, won) = self
      .store
      .punch_out_if_open(identity_id, current.day, obs.now)
      .await
      .map_err(classify)?;

    if updated.punch_out_at.is_none() {
      // The guarded update reported a result, yet the row is still open.
      // `punch_out_at` is never unset once written, so the row is damaged.
      return Err(Error::CorruptRecord {
        identity_id,
        day:    updated.day,
        detail: "punch-out applied but the record is still open".into(),
      });
    }

    if won {
      tracing::info!(%identity_id, day = %updated.day, "punched out");
    } else {
      tracing::warn!(
        %identity_id,
        day = %updated.day,
        "lost punch-out race, reporting the winner's record"
      );
    }

    Ok(PunchOutcome::PunchedOut { record: updated })
  }
}

/// Map a backend error into the engine's taxonomy.
fn classify<E: StoreError>(e: E) -> Error {
  if e.is_transient() {
    Error::StoreUnavailable(Box::new(e))
  } else {
    Error::Store(Box::new(e))
  }
}
