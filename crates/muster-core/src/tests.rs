//! Engine and calendar tests against an in-process memory store.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use uuid::Uuid;

use crate::{
  clock::{Calendar, DayKey, ManualClock},
  engine::PunchEngine,
  error::Error,
  identity::{Identity, NewIdentity, Role},
  punch::{PunchOutcome, PunchRecord},
  store::{AttendanceStore, ReportQuery, StoreError},
};

// ─── Memory store ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum MemoryError {
  #[error("store offline")]
  Offline { transient: bool },
  #[error("no punch record to close")]
  MissingRecord,
}

impl StoreError for MemoryError {
  fn is_transient(&self) -> bool {
    matches!(self, MemoryError::Offline { transient: true })
  }
}

#[derive(Default)]
struct Inner {
  identities: HashMap<Uuid, Identity>,
  punches:    HashMap<(Uuid, DayKey), PunchRecord>,
  /// Errors to inject, consumed front-first, one per store call.
  faults:     Vec<MemoryError>,
}

/// Mutex-guarded memory backend. Every operation runs under the lock, which
/// trivially satisfies the per-key serialisation contract.
#[derive(Clone, Default)]
struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
  fn push_fault(&self, transient: bool) {
    self
      .inner
      .lock()
      .unwrap()
      .faults
      .push(MemoryError::Offline { transient });
  }

  fn remaining_faults(&self) -> usize {
    self.inner.lock().unwrap().faults.len()
  }
}

impl Inner {
  fn take_fault(&mut self) -> Result<(), MemoryError> {
    if self.faults.is_empty() {
      Ok(())
    } else {
      Err(self.faults.remove(0))
    }
  }
}

impl AttendanceStore for MemoryStore {
  type Error = MemoryError;

  async fn add_identity(
    &self,
    input: NewIdentity,
  ) -> Result<Identity, MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    let identity = Identity {
      identity_id:    Uuid::new_v4(),
      display_name:   input.display_name,
      role:           input.role,
      enrollment_ref: input.enrollment_ref,
      created_at:     Utc::now(),
    };
    inner
      .identities
      .insert(identity.identity_id, identity.clone());
    Ok(identity)
  }

  async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>, MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    Ok(inner.identities.get(&id).cloned())
  }

  async fn list_identities(
    &self,
    role: Option<Role>,
  ) -> Result<Vec<Identity>, MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    let mut identities: Vec<Identity> = inner
      .identities
      .values()
      .filter(|i| role.is_none_or(|r| i.role == r))
      .cloned()
      .collect();
    identities.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(identities)
  }

  async fn insert_if_absent(
    &self,
    record: PunchRecord,
  ) -> Result<(PunchRecord, bool), MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    let key = (record.identity_id, record.day);
    match inner.punches.get(&key) {
      Some(existing) => Ok((existing.clone(), false)),
      None => {
        inner.punches.insert(key, record.clone());
        Ok((record, true))
      }
    }
  }

  async fn punch_out_if_open(
    &self,
    identity_id: Uuid,
    day: DayKey,
    at: DateTime<Utc>,
  ) -> Result<(PunchRecord, bool), MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    match inner.punches.get_mut(&(identity_id, day)) {
      None => Err(MemoryError::MissingRecord),
      Some(record) if record.punch_out_at.is_none() => {
        record.punch_out_at = Some(at);
        Ok((record.clone(), true))
      }
      Some(record) => Ok((record.clone(), false)),
    }
  }

  async fn find_punch(
    &self,
    identity_id: Uuid,
    day: DayKey,
  ) -> Result<Option<PunchRecord>, MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    Ok(inner.punches.get(&(identity_id, day)).cloned())
  }

  async fn list_punches(
    &self,
    query: &ReportQuery,
  ) -> Result<Vec<PunchRecord>, MemoryError> {
    let mut inner = self.inner.lock().unwrap();
    inner.take_fault()?;
    let mut records: Vec<PunchRecord> = inner
      .punches
      .values()
      .filter(|r| r.day >= query.from && r.day <= query.to)
      .filter(|r| query.identity_id.is_none_or(|id| r.identity_id == id))
      .cloned()
      .collect();
    records.sort_by(|a, b| (a.day, a.punch_in_at).cmp(&(b.day, b.punch_in_at)));
    Ok(records)
  }
}

/// Delegates to a [`MemoryStore`], except that a rival kiosk closes the
/// record between the engine's cooldown check and its conditional update.
struct RivalrousStore {
  inner:    MemoryStore,
  rival_at: DateTime<Utc>,
}

impl AttendanceStore for RivalrousStore {
  type Error = MemoryError;

  async fn add_identity(
    &self,
    input: NewIdentity,
  ) -> Result<Identity, MemoryError> {
    self.inner.add_identity(input).await
  }

  async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>, MemoryError> {
    self.inner.get_identity(id).await
  }

  async fn list_identities(
    &self,
    role: Option<Role>,
  ) -> Result<Vec<Identity>, MemoryError> {
    self.inner.list_identities(role).await
  }

  async fn insert_if_absent(
    &self,
    record: PunchRecord,
  ) -> Result<(PunchRecord, bool), MemoryError> {
    self.inner.insert_if_absent(record).await
  }

  async fn punch_out_if_open(
    &self,
    identity_id: Uuid,
    day: DayKey,
    at: DateTime<Utc>,
  ) -> Result<(PunchRecord, bool), MemoryError> {
    self
      .inner
      .punch_out_if_open(identity_id, day, self.rival_at)
      .await?;
    self.inner.punch_out_if_open(identity_id, day, at).await
  }

  async fn find_punch(
    &self,
    identity_id: Uuid,
    day: DayKey,
  ) -> Result<Option<PunchRecord>, MemoryError> {
    self.inner.find_punch(identity_id, day).await
  }

  async fn list_punches(
    &self,
    query: &ReportQuery,
  ) -> Result<Vec<PunchRecord>, MemoryError> {
    self.inner.list_punches(query).await
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn zone() -> FixedOffset {
  FixedOffset::east_opt(0).expect("utc offset")
}

fn instant(s: &str) -> DateTime<Utc> {
  s.parse().expect("test instant")
}

async fn engine_with(
  cooldown_seconds: i64,
  start: &str,
) -> (
  Arc<PunchEngine<MemoryStore, ManualClock>>,
  MemoryStore,
  ManualClock,
  Uuid,
) {
  let store = MemoryStore::default();
  let identity = store
    .add_identity(NewIdentity {
      display_name:   "Ada Lovelace".to_string(),
      role:           Role::Student,
      enrollment_ref: None,
    })
    .await
    .expect("register identity");
  let clock = ManualClock::starting_at(instant(start));
  let engine = PunchEngine::new(
    Arc::new(store.clone()),
    Calendar::new(clock.clone(), zone()),
    TimeDelta::seconds(cooldown_seconds),
  );
  (Arc::new(engine), store, clock, identity.identity_id)
}

fn expect_punched_in(outcome: PunchOutcome) -> PunchRecord {
  match outcome {
    PunchOutcome::PunchedIn { record } => record,
    other => panic!("expected punched_in, got {other:?}"),
  }
}

fn expect_punched_out(outcome: PunchOutcome) -> PunchRecord {
  match outcome {
    PunchOutcome::PunchedOut { record } => record,
    other => panic!("expected punched_out, got {other:?}"),
  }
}

// ─── State machine ───────────────────────────────────────────────────────────

#[tokio::test]
async fn first_punch_of_day_creates_record() {
  let (engine, store, _clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;

  let record = expect_punched_in(engine.record_punch(id).await.expect("punch"));
  assert_eq!(record.identity_id, id);
  assert_eq!(record.punch_in_at, instant("2025-01-10T09:00:00Z"));
  assert_eq!(record.punch_out_at, None);
  assert_eq!(record.display_name, "Ada Lovelace");
  assert_eq!(record.display_role, Role::Student);
  assert_eq!(record.day.to_string(), "2025-01-10");

  let stored = store
    .find_punch(id, record.day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(stored, record);
}

#[tokio::test]
async fn unknown_identity_is_rejected_without_writing() {
  let (engine, store, _clock, _id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  let ghost = Uuid::new_v4();

  let err = engine.record_punch(ghost).await.unwrap_err();
  assert!(matches!(err, Error::IdentityNotFound(id) if id == ghost));

  let day = DayKey::of(instant("2025-01-10T09:00:00Z"), zone());
  assert!(store.find_punch(ghost, day).await.expect("find").is_none());
}

#[tokio::test]
async fn second_scan_within_cooldown_is_too_soon() {
  let (engine, store, clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  let record = expect_punched_in(engine.record_punch(id).await.expect("punch"));

  clock.advance(TimeDelta::seconds(30));
  match engine.record_punch(id).await.expect("second scan") {
    PunchOutcome::TooSoon {
      record: seen,
      elapsed_seconds,
    } => {
      assert_eq!(elapsed_seconds, 30);
      assert_eq!(seen, record);
    }
    other => panic!("expected too_soon, got {other:?}"),
  }

  // Nothing was written.
  let stored = store
    .find_punch(id, record.day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(stored, record);
}

#[tokio::test]
async fn cooldown_boundary_is_inclusive() {
  let (engine, _store, clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  engine.record_punch(id).await.expect("punch in");

  clock.advance(TimeDelta::seconds(59));
  match engine.record_punch(id).await.expect("second scan") {
    PunchOutcome::TooSoon { elapsed_seconds, .. } => {
      assert_eq!(elapsed_seconds, 59)
    }
    other => panic!("expected too_soon, got {other:?}"),
  }

  // Exactly the cooldown elapsed punches out.
  clock.advance(TimeDelta::seconds(1));
  let record =
    expect_punched_out(engine.record_punch(id).await.expect("third scan"));
  assert_eq!(record.punch_out_at, Some(instant("2025-01-10T09:01:00Z")));
}

#[tokio::test]
async fn full_day_scenario() {
  let (engine, _store, clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;

  let record = expect_punched_in(engine.record_punch(id).await.expect("scan 1"));
  assert_eq!(record.punch_in_at, instant("2025-01-10T09:00:00Z"));

  clock.set(instant("2025-01-10T09:00:30Z"));
  match engine.record_punch(id).await.expect("scan 2") {
    PunchOutcome::TooSoon {
      record,
      elapsed_seconds,
    } => {
      assert_eq!(elapsed_seconds, 30);
      assert_eq!(record.punch_out_at, None);
    }
    other => panic!("expected too_soon, got {other:?}"),
  }

  clock.set(instant("2025-01-10T09:01:05Z"));
  let record = expect_punched_out(engine.record_punch(id).await.expect("scan 3"));
  assert_eq!(record.punch_in_at, instant("2025-01-10T09:00:00Z"));
  assert_eq!(record.punch_out_at, Some(instant("2025-01-10T09:01:05Z")));

  clock.set(instant("2025-01-10T09:05:00Z"));
  match engine.record_punch(id).await.expect("scan 4") {
    PunchOutcome::AlreadyPunchedOut { record } => {
      assert_eq!(record.punch_in_at, instant("2025-01-10T09:00:00Z"));
      assert_eq!(record.punch_out_at, Some(instant("2025-01-10T09:01:05Z")));
    }
    other => panic!("expected already_punched_out, got {other:?}"),
  }
}

#[tokio::test]
async fn terminal_state_is_idempotent() {
  let (engine, store, clock, id) = engine_with(0, "2025-01-10T09:00:00Z").await;
  engine.record_punch(id).await.expect("punch in");
  clock.advance(TimeDelta::seconds(1));
  let closed =
    expect_punched_out(engine.record_punch(id).await.expect("punch out"));

  for _ in 0..3 {
    clock.advance(TimeDelta::seconds(60));
    match engine.record_punch(id).await.expect("extra scan") {
      PunchOutcome::AlreadyPunchedOut { record } => assert_eq!(record, closed),
      other => panic!("expected already_punched_out, got {other:?}"),
    }
  }

  let stored = store
    .find_punch(id, closed.day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(stored, closed);
}

#[tokio::test]
async fn backwards_clock_reads_as_too_soon() {
  let (engine, _store, clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  engine.record_punch(id).await.expect("punch in");

  // The kiosk clock stepping backwards must not punch anyone out.
  clock.set(instant("2025-01-10T08:59:30Z"));
  match engine.record_punch(id).await.expect("skewed scan") {
    PunchOutcome::TooSoon { elapsed_seconds, .. } => {
      assert_eq!(elapsed_seconds, -30)
    }
    other => panic!("expected too_soon, got {other:?}"),
  }
}

#[tokio::test]
async fn day_rollover_starts_a_fresh_record() {
  let (engine, store, clock, id) =
    engine_with(60, "2025-01-10T23:59:30Z").await;
  let first =
    expect_punched_in(engine.record_punch(id).await.expect("evening punch"));

  // Past local midnight the same identity keys a new record. Yesterday's
  // stays open.
  clock.advance(TimeDelta::seconds(60));
  let second =
    expect_punched_in(engine.record_punch(id).await.expect("after midnight"));

  assert_ne!(first.day, second.day);
  let yesterday = store
    .find_punch(id, first.day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(yesterday.punch_out_at, None);
}

// ─── Calendar ────────────────────────────────────────────────────────────────

#[test]
fn day_key_respects_configured_zone() {
  let at = instant("2025-01-10T20:30:00Z");

  let kolkata = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("offset");
  assert_eq!(DayKey::of(at, kolkata).to_string(), "2025-01-11");

  let pacific = FixedOffset::west_opt(8 * 3600).expect("offset");
  assert_eq!(DayKey::of(at, pacific).to_string(), "2025-01-10");

  assert_eq!(DayKey::of(at, zone()).to_string(), "2025-01-10");
}

#[test]
fn observation_derives_day_from_the_same_instant() {
  let clock = ManualClock::starting_at(instant("2025-01-10T23:59:59Z"));
  let kolkata = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("offset");
  let calendar = Calendar::new(clock, kolkata);

  let obs = calendar.observe();
  assert_eq!(obs.day, DayKey::of(obs.now, kolkata));
  assert_eq!(obs.day.to_string(), "2025-01-11");
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_scans_create_one_record() {
  let (engine, store, _clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;

  let mut handles = Vec::new();
  for _ in 0..8 {
    let engine = Arc::clone(&engine);
    handles.push(tokio::spawn(async move { engine.record_punch(id).await }));
  }

  let mut punched_in = 0;
  let mut winner = None;
  for handle in handles {
    match handle.await.expect("join").expect("punch") {
      PunchOutcome::PunchedIn { record } => {
        punched_in += 1;
        winner = Some(record);
      }
      PunchOutcome::TooSoon {
        record,
        elapsed_seconds,
      } => {
        assert_eq!(elapsed_seconds, 0);
        assert_eq!(record.punch_out_at, None);
      }
      other => panic!("unexpected outcome {other:?}"),
    }
  }

  assert_eq!(punched_in, 1);
  let winner = winner.expect("one winner");
  let stored = store
    .find_punch(id, winner.day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(stored, winner);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_punch_outs_converge_on_one_timestamp() {
  let (engine, store, clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  engine.record_punch(id).await.expect("punch in");
  clock.advance(TimeDelta::seconds(90));

  let mut handles = Vec::new();
  for _ in 0..8 {
    let engine = Arc::clone(&engine);
    handles.push(tokio::spawn(async move { engine.record_punch(id).await }));
  }

  let mut stamps = Vec::new();
  for handle in handles {
    let record =
      expect_punched_out(handle.await.expect("join").expect("punch"));
    stamps.push(record.punch_out_at.expect("terminal record"));
  }

  assert_eq!(stamps.len(), 8);
  assert!(stamps.windows(2).all(|w| w[0] == w[1]));

  let day = DayKey::of(instant("2025-01-10T09:00:00Z"), zone());
  let stored = store
    .find_punch(id, day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(stored.punch_out_at, Some(stamps[0]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn store_punch_out_races_have_one_winner() {
  let store = MemoryStore::default();
  let identity = store
    .add_identity(NewIdentity {
      display_name:   "Grace Hopper".to_string(),
      role:           Role::Faculty,
      enrollment_ref: None,
    })
    .await
    .expect("register identity");
  let id = identity.identity_id;
  let day = DayKey::of(instant("2025-01-10T09:00:00Z"), zone());

  store
    .insert_if_absent(PunchRecord {
      identity_id:  id,
      day,
      punch_in_at:  instant("2025-01-10T09:00:00Z"),
      punch_out_at: None,
      display_name: identity.display_name.clone(),
      display_role: identity.role,
    })
    .await
    .expect("seed open record");

  let mut handles = Vec::new();
  for i in 0..8 {
    let store = store.clone();
    let at = instant("2025-01-10T09:05:00Z") + TimeDelta::seconds(i);
    handles.push(tokio::spawn(async move {
      store.punch_out_if_open(id, day, at).await
    }));
  }

  let mut wins = 0;
  let mut stamp = None;
  for handle in handles {
    let (record, won) = handle.await.expect("join").expect("punch out");
    let out = record.punch_out_at.expect("closed record");
    if won {
      wins += 1;
    }
    match stamp {
      None => stamp = Some(out),
      Some(s) => assert_eq!(s, out),
    }
  }

  assert_eq!(wins, 1);
}

#[tokio::test]
async fn lost_punch_out_race_reports_the_winner_record() {
  let store = MemoryStore::default();
  let identity = store
    .add_identity(NewIdentity {
      display_name:   "Ada Lovelace".to_string(),
      role:           Role::Student,
      enrollment_ref: None,
    })
    .await
    .expect("register identity");
  let id = identity.identity_id;

  let rival_at = instant("2025-01-10T09:02:00Z");
  let rigged = RivalrousStore {
    inner: store.clone(),
    rival_at,
  };
  let clock = ManualClock::starting_at(instant("2025-01-10T09:00:00Z"));
  let engine = PunchEngine::new(
    Arc::new(rigged),
    Calendar::new(clock.clone(), zone()),
    TimeDelta::seconds(60),
  );

  engine.record_punch(id).await.expect("punch in");

  // The rival closes the record mid-operation; this call's update loses
  // and reports the rival's stored state as success.
  clock.set(instant("2025-01-10T09:03:00Z"));
  let record =
    expect_punched_out(engine.record_punch(id).await.expect("late scan"));
  assert_eq!(record.punch_out_at, Some(rival_at));
}

// ─── Failure handling ────────────────────────────────────────────────────────

#[tokio::test]
async fn transient_store_failure_is_retried() {
  let (engine, store, _clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  store.push_fault(true);
  store.push_fault(true);

  let outcome = engine.record_punch(id).await.expect("punch");
  assert!(matches!(outcome, PunchOutcome::PunchedIn { .. }));
}

#[tokio::test]
async fn retry_budget_is_bounded() {
  let (engine, store, _clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  store.push_fault(true);
  store.push_fault(true);
  store.push_fault(true);

  let err = engine.record_punch(id).await.unwrap_err();
  assert!(matches!(err, Error::StoreUnavailable(_)));
}

#[tokio::test]
async fn permanent_store_failure_is_not_retried() {
  let (engine, store, _clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;
  store.push_fault(false);

  let err = engine.record_punch(id).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  // A retry would have consumed nothing further and succeeded; the single
  // fault being gone shows exactly one attempt ran.
  assert_eq!(store.remaining_faults(), 0);
}

#[tokio::test]
async fn corrupt_record_is_surfaced_not_repaired() {
  let (engine, store, _clock, id) =
    engine_with(60, "2025-01-10T09:00:00Z").await;

  let day = DayKey::of(instant("2025-01-10T09:00:00Z"), zone());
  let damaged = PunchRecord {
    identity_id:  id,
    day,
    punch_in_at:  instant("2025-01-10T09:00:00Z"),
    punch_out_at: Some(instant("2025-01-10T08:00:00Z")),
    display_name: "Ada Lovelace".to_string(),
    display_role: Role::Student,
  };
  store
    .insert_if_absent(damaged.clone())
    .await
    .expect("seed damaged row");

  let err = engine.record_punch(id).await.unwrap_err();
  assert!(matches!(err, Error::CorruptRecord { .. }));

  // The row is reported, never rewritten.
  let stored = store
    .find_punch(id, day)
    .await
    .expect("find")
    .expect("record");
  assert_eq!(stored, damaged);
}

// ─── Reporting ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_query_filters_by_range_and_identity() {
  let store = MemoryStore::default();
  let ada = store
    .add_identity(NewIdentity {
      display_name:   "Ada Lovelace".to_string(),
      role:           Role::Student,
      enrollment_ref: None,
    })
    .await
    .expect("register");
  let grace = store
    .add_identity(NewIdentity {
      display_name:   "Grace Hopper".to_string(),
      role:           Role::Faculty,
      enrollment_ref: None,
    })
    .await
    .expect("register");

  for (identity, start) in [
    (&ada, "2025-01-09T09:00:00Z"),
    (&ada, "2025-01-10T09:00:00Z"),
    (&grace, "2025-01-10T10:00:00Z"),
    (&ada, "2025-01-12T09:00:00Z"),
  ] {
    let at = instant(start);
    store
      .insert_if_absent(PunchRecord {
        identity_id:  identity.identity_id,
        day:          DayKey::of(at, zone()),
        punch_in_at:  at,
        punch_out_at: None,
        display_name: identity.display_name.clone(),
        display_role: identity.role,
      })
      .await
      .expect("seed record");
  }

  let from = DayKey::of(instant("2025-01-10T00:00:00Z"), zone());
  let to = DayKey::of(instant("2025-01-11T00:00:00Z"), zone());

  let all = store
    .list_punches(&ReportQuery {
      from,
      to,
      identity_id: None,
    })
    .await
    .expect("list");
  assert_eq!(all.len(), 2);
  assert!(all.windows(2).all(|w| {
    (w[0].day, w[0].punch_in_at) <= (w[1].day, w[1].punch_in_at)
  }));

  let only_ada = store
    .list_punches(&ReportQuery {
      from,
      to,
      identity_id: Some(ada.identity_id),
    })
    .await
    .expect("list");
  assert_eq!(only_ada.len(), 1);
  assert_eq!(only_ada[0].identity_id, ada.identity_id);
}
