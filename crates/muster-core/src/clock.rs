//! Clock and calendar.
//!
//! A punch operation reads the clock exactly once: the day key, the
//! cooldown check, and every timestamp it writes all come from that single
//! reading. [`Calendar::observe`] packages the reading together with the
//! day it falls on so callers cannot accidentally derive them from two
//! different instants.

use std::{
  fmt,
  str::FromStr,
  sync::{Arc, Mutex},
};

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

// ─── Day key ─────────────────────────────────────────────────────────────────

/// The attendance day: a calendar date reckoned in the site's configured
/// zone. Together with the identity id it is the partition key for punch
/// records.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
  /// The day `instant` falls on when viewed in `zone`.
  pub fn of(instant: DateTime<Utc>, zone: FixedOffset) -> Self {
    Self(instant.with_timezone(&zone).date_naive())
  }

  pub fn from_date(date: NaiveDate) -> Self { Self(date) }

  pub fn date(&self) -> NaiveDate { self.0 }
}

impl fmt::Display for DayKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // `NaiveDate` already renders as YYYY-MM-DD.
    self.0.fmt(f)
  }
}

impl FromStr for DayKey {
  type Err = chrono::ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(s.parse()?)) }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of the current instant. [`SystemClock`] in production,
/// [`ManualClock`] in tests.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
  instant: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
  pub fn starting_at(instant: DateTime<Utc>) -> Self {
    Self {
      instant: Arc::new(Mutex::new(instant)),
    }
  }

  pub fn set(&self, instant: DateTime<Utc>) {
    *self.instant.lock().expect("clock mutex poisoned") = instant;
  }

  pub fn advance(&self, delta: TimeDelta) {
    *self.instant.lock().expect("clock mutex poisoned") += delta;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.instant.lock().expect("clock mutex poisoned")
  }
}

// ─── Calendar ────────────────────────────────────────────────────────────────

/// One reading of the clock: the instant and the attendance day derived
/// from it.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
  pub now: DateTime<Utc>,
  pub day: DayKey,
}

/// Pairs a [`Clock`] with the site's fixed-offset zone.
///
/// The zone is configuration. It is never supplied by callers, so a client
/// cannot shift which attendance day it lands on.
#[derive(Debug, Clone)]
pub struct Calendar<C> {
  clock: C,
  zone:  FixedOffset,
}

impl<C: Clock> Calendar<C> {
  pub fn new(clock: C, zone: FixedOffset) -> Self { Self { clock, zone } }

  /// Read the clock once and derive the day key from that same instant.
  pub fn observe(&self) -> Observation {
    let now = self.clock.now();
    Observation {
      now,
      day: DayKey::of(now, self.zone),
    }
  }

  pub fn zone(&self) -> FixedOffset { self.zone }
}
