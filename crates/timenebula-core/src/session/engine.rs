//! Session engine implementation.
//!
//! The session engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `check_time()`
//! periodically (see [`crate::poller::ClockPoller`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Working -> Settlement -> Working -> Idle
//!           ^            |
//!           +-- settle --+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(settings, ledger, SystemClock)?;
//! engine.start_work();
//! // In a loop:
//! engine.check_time(); // Returns Some(Event::SettlementDue) when a unit elapsed
//! engine.complete_settlement("Code");
//! ```
//!
//! Ledger writes are best-effort. When one fails the engine still applies the
//! in-memory transition and hands the error back in the [`Transition`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, PersistenceError};
use crate::events::Event;
use crate::ledger::{Ledger, NewHourChunk};
use crate::storage::EngineSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    #[default]
    Idle,
    Working,
    /// At least one unit is waiting to be claimed; work is blocked until then.
    Settlement,
}

/// The session currently being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub id: i64,
    /// False when `id` is a local fallback with no ledger row behind it.
    pub durable: bool,
}

/// Process-local engine state.
///
/// Serializable so front ends that do not outlive a single command can
/// persist it between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineState {
    status: EngineStatus,
    #[serde(default)]
    start_time: Option<u64>,
    #[serde(default)]
    last_settled_time: Option<u64>,
    #[serde(default)]
    session: Option<ActiveSession>,
    #[serde(default)]
    total_assets: u64,
    #[serde(default)]
    hourly_rate: u64,
    #[serde(default)]
    unclaimed_hours: u64,
}

impl EngineState {
    fn idle(hourly_rate: u64) -> Self {
        Self {
            hourly_rate,
            ..Self::default()
        }
    }

    /// Whether the fields agree with `status`.
    pub fn is_consistent(&self) -> bool {
        let tracking =
            self.start_time.is_some() && self.last_settled_time.is_some() && self.session.is_some();
        match self.status {
            EngineStatus::Idle => !tracking,
            EngineStatus::Working => tracking,
            EngineStatus::Settlement => tracking && self.unclaimed_hours >= 1,
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn total_assets(&self) -> u64 {
        self.total_assets
    }
}

/// Outcome of a user-driven transition.
///
/// `event` is `None` when the call was a no-op because its precondition did
/// not hold. `ledger_error` carries a persistence failure the engine logged
/// and then moved past.
#[derive(Debug, Default)]
pub struct Transition {
    pub event: Option<Event>,
    pub ledger_error: Option<PersistenceError>,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    pub fn is_applied(&self) -> bool {
        self.event.is_some()
    }
}

/// Work session state machine with reward accrual.
///
/// Operates on wall-clock deltas from an injected [`Clock`] -- no internal thread.
pub struct SessionEngine<L, C = SystemClock> {
    state: EngineState,
    time_unit_ms: u64,
    ledger: L,
    clock: C,
}

impl<L: Ledger, C: Clock> SessionEngine<L, C> {
    /// Create an idle engine with zero assets.
    ///
    /// # Errors
    /// Returns an error if `settings` has a zero time-unit.
    pub fn new(settings: EngineSettings, ledger: L, clock: C) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            state: EngineState::idle(settings.hourly_rate),
            time_unit_ms: settings.time_unit_ms,
            ledger,
            clock,
        })
    }

    /// Resume from a previously saved state.
    ///
    /// The configured rate replaces the saved one. A state whose fields
    /// contradict its status is reset to idle, keeping its assets.
    pub fn restore(
        mut state: EngineState,
        settings: EngineSettings,
        ledger: L,
        clock: C,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !state.is_consistent() {
            warn!(status = ?state.status, "saved engine state is inconsistent, resetting to idle");
            state = EngineState {
                total_assets: state.total_assets,
                ..EngineState::idle(settings.hourly_rate)
            };
        }
        state.hourly_rate = settings.hourly_rate;
        Ok(Self {
            state,
            time_unit_ms: settings.time_unit_ms,
            ledger,
            clock,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn status(&self) -> EngineStatus {
        self.state.status
    }

    pub fn start_time(&self) -> Option<u64> {
        self.state.start_time
    }

    pub fn last_settled_time(&self) -> Option<u64> {
        self.state.last_settled_time
    }

    pub fn session_id(&self) -> Option<i64> {
        self.state.session.map(|s| s.id)
    }

    pub fn total_assets(&self) -> u64 {
        self.state.total_assets
    }

    pub fn hourly_rate(&self) -> u64 {
        self.state.hourly_rate
    }

    pub fn unclaimed_hours(&self) -> u64 {
        self.state.unclaimed_hours
    }

    pub fn time_unit_ms(&self) -> u64 {
        self.time_unit_ms
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let now = self.clock.now_ms();
        let next_unit_in_ms = match (self.state.status, self.state.last_settled_time) {
            (EngineStatus::Working, Some(last)) => {
                Some(last.saturating_add(self.time_unit_ms).saturating_sub(now))
            }
            _ => None,
        };
        Event::StateSnapshot {
            status: self.state.status,
            session_id: self.session_id(),
            start_time: self.state.start_time,
            last_settled_time: self.state.last_settled_time,
            total_assets: self.state.total_assets,
            hourly_rate: self.state.hourly_rate,
            unclaimed_hours: self.state.unclaimed_hours,
            time_unit_ms: self.time_unit_ms,
            next_unit_in_ms,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open a session and start accruing.
    ///
    /// If the ledger refuses the session, work still starts under a local
    /// fallback id derived from the current time.
    pub fn start_work(&mut self) -> Transition {
        if self.state.status != EngineStatus::Idle {
            debug!(status = ?self.state.status, "start_work ignored: already tracking");
            return Transition::none();
        }

        let now = self.clock.now_ms();
        let (session, ledger_error) = match self.ledger.create_session(now) {
            Ok(id) => (ActiveSession { id, durable: true }, None),
            Err(e) => {
                warn!(error = %e, "failed to open session in ledger, tracking locally");
                let id = i64::try_from(now).unwrap_or(i64::MAX);
                (ActiveSession { id, durable: false }, Some(e))
            }
        };

        self.state.status = EngineStatus::Working;
        self.state.start_time = Some(now);
        self.state.last_settled_time = Some(now);
        self.state.session = Some(session);
        info!(session_id = session.id, durable = session.durable, "work started");

        Transition {
            event: Some(Event::WorkStarted {
                session_id: session.id,
                durable: session.durable,
                at: now,
            }),
            ledger_error,
        }
    }

    /// Close the open session and go idle. Assets are kept.
    pub fn stop_work(&mut self) -> Transition {
        if self.state.status != EngineStatus::Working {
            debug!(status = ?self.state.status, "stop_work ignored: not working");
            return Transition::none();
        }

        let now = self.clock.now_ms();
        let session = self.state.session.take();
        let mut ledger_error = None;
        if let Some(active) = session.filter(|s| s.durable) {
            if let Err(e) = self.ledger.close_session(active.id, now) {
                warn!(session_id = active.id, error = %e, "failed to close session in ledger");
                ledger_error = Some(e);
            }
        }

        let worked_ms = self
            .state
            .start_time
            .map_or(0, |start| now.saturating_sub(start));
        self.state.status = EngineStatus::Idle;
        self.state.start_time = None;
        self.state.last_settled_time = None;
        info!(session_id = ?session.map(|s| s.id), worked_ms, "work stopped");

        Transition {
            event: Some(Event::WorkStopped {
                session_id: session.map(|s| s.id),
                worked_ms,
                at: now,
            }),
            ledger_error,
        }
    }

    /// Call periodically. Returns `Some(Event::SettlementDue)` when at least
    /// one whole unit has elapsed since the last settled boundary.
    pub fn check_time(&mut self) -> Option<Event> {
        if self.state.status != EngineStatus::Working {
            return None;
        }
        let last = self.state.last_settled_time?;

        let now = self.clock.now_ms();
        let diff = now.saturating_sub(last);
        if diff < self.time_unit_ms {
            return None;
        }

        let units = diff / self.time_unit_ms;
        self.state.unclaimed_hours = units;
        self.state.status = EngineStatus::Settlement;
        info!(unclaimed_hours = units, "settlement due");

        Some(Event::SettlementDue {
            unclaimed_hours: units,
            at: now,
        })
    }

    /// Enter the claim flow by hand.
    ///
    /// Does not look at elapsed time. The unclaimed count is raised to at
    /// least one so a single claim is always available. No-op while idle.
    pub fn trigger_settlement(&mut self) -> Option<Event> {
        if self.state.status == EngineStatus::Idle {
            debug!("trigger_settlement ignored: no open session");
            return None;
        }

        self.state.status = EngineStatus::Settlement;
        self.state.unclaimed_hours = self.state.unclaimed_hours.max(1);
        info!(unclaimed_hours = self.state.unclaimed_hours, "settlement forced");

        Some(Event::SettlementForced {
            unclaimed_hours: self.state.unclaimed_hours,
            at: self.clock.now_ms(),
        })
    }

    /// Claim one unit and tag it with `tag`.
    ///
    /// Credits the rate, moves the settled boundary forward by exactly one
    /// unit and records an hour chunk. Stays in settlement while more units
    /// remain unclaimed. No-op outside settlement or with a blank tag.
    pub fn complete_settlement(&mut self, tag: &str) -> Transition {
        if self.state.status != EngineStatus::Settlement {
            debug!(status = ?self.state.status, "complete_settlement ignored: nothing to claim");
            return Transition::none();
        }
        let tag = tag.trim();
        if tag.is_empty() {
            debug!("complete_settlement ignored: empty tag");
            return Transition::none();
        }

        let now = self.clock.now_ms();
        let amount = self.state.hourly_rate;
        self.state.total_assets = self.state.total_assets.saturating_add(amount);
        self.state.last_settled_time = self
            .state
            .last_settled_time
            .map(|t| t.saturating_add(self.time_unit_ms));

        let mut chunk_id = None;
        let mut ledger_error = None;
        if let Some(session) = self.state.session {
            let chunk = NewHourChunk::collected(session.id, now, amount, tag);
            match self.ledger.add_hour_chunk(&chunk) {
                Ok(id) => chunk_id = Some(id),
                Err(e) => {
                    warn!(session_id = session.id, error = %e, "failed to record hour chunk");
                    ledger_error = Some(e);
                }
            }
        }

        self.state.unclaimed_hours = self.state.unclaimed_hours.saturating_sub(1);
        self.state.status = if self.state.unclaimed_hours > 0 {
            EngineStatus::Settlement
        } else {
            EngineStatus::Working
        };
        info!(
            project = tag,
            amount,
            total_assets = self.state.total_assets,
            remaining = self.state.unclaimed_hours,
            "settlement completed"
        );

        Transition {
            event: Some(Event::SettlementCompleted {
                chunk_id,
                project: tag.to_string(),
                amount,
                total_assets: self.state.total_assets,
                unclaimed_hours: self.state.unclaimed_hours,
                last_settled_time: self.state.last_settled_time.unwrap_or_default(),
                at: now,
            }),
            ledger_error,
        }
    }

    /// Credit assets directly. Touches neither the ledger nor the status.
    pub fn add_assets(&mut self, amount: u64) -> Event {
        self.state.total_assets = self.state.total_assets.saturating_add(amount);
        info!(amount, total_assets = self.state.total_assets, "assets added");
        Event::AssetsAdded {
            amount,
            total_assets: self.state.total_assets,
            at: self.clock.now_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ledger::{ChunkStatus, MemoryLedger};
    use crate::time::HOUR_MS;

    fn settings() -> EngineSettings {
        EngineSettings {
            hourly_rate: 350,
            time_unit_ms: HOUR_MS,
        }
    }

    fn engine<'a>(
        ledger: &'a MemoryLedger,
        clock: &ManualClock,
    ) -> SessionEngine<&'a MemoryLedger, ManualClock> {
        SessionEngine::new(settings(), ledger, clock.clone()).unwrap()
    }

    #[test]
    fn zero_time_unit_is_rejected() {
        let ledger = MemoryLedger::new();
        let result = SessionEngine::new(
            EngineSettings {
                hourly_rate: 350,
                time_unit_ms: 0,
            },
            &ledger,
            ManualClock::new(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn scenario_a_single_unit() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);

        let started = engine.start_work();
        assert!(started.ledger_error.is_none());
        assert_eq!(engine.status(), EngineStatus::Working);
        assert_eq!(engine.last_settled_time(), Some(0));
        let session_id = engine.session_id().unwrap();

        clock.set(3_600_001);
        let due = engine.check_time();
        assert!(matches!(due, Some(Event::SettlementDue { unclaimed_hours: 1, .. })));
        assert_eq!(engine.status(), EngineStatus::Settlement);
        assert_eq!(engine.unclaimed_hours(), 1);

        let settled = engine.complete_settlement("Code");
        assert!(settled.is_applied());
        assert!(settled.ledger_error.is_none());
        assert_eq!(engine.total_assets(), 350);
        assert_eq!(engine.last_settled_time(), Some(3_600_000));
        assert_eq!(engine.status(), EngineStatus::Working);
        assert_eq!(engine.unclaimed_hours(), 0);

        let chunks = ledger.list_hour_chunks().unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].amount, 350);
        assert_eq!(chunks[0].project.as_deref(), Some("Code"));
        assert_eq!(chunks[0].status, ChunkStatus::Collected);
        assert_eq!(chunks[0].session_id, session_id);
        assert_eq!(chunks[0].timestamp, 3_600_001);
    }

    #[test]
    fn scenario_b_two_units_drain() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();

        clock.set(7_200_001);
        engine.check_time();
        assert_eq!(engine.unclaimed_hours(), 2);

        engine.complete_settlement("Design");
        assert_eq!(engine.status(), EngineStatus::Settlement);
        assert_eq!(engine.unclaimed_hours(), 1);
        assert_eq!(engine.last_settled_time(), Some(3_600_000));

        clock.advance(12_345);
        engine.complete_settlement("Debug");
        assert_eq!(engine.status(), EngineStatus::Working);
        assert_eq!(engine.unclaimed_hours(), 0);
        assert_eq!(engine.total_assets(), 700);
        assert_eq!(engine.last_settled_time(), Some(7_200_000));
        assert_eq!(ledger.list_hour_chunks().unwrap().len(), 2);
    }

    #[test]
    fn scenario_c_ledger_down_still_tracks() {
        let ledger = MemoryLedger::unavailable();
        let clock = ManualClock::new(1_700_000_000_000);
        let mut engine = engine(&ledger, &clock);

        let started = engine.start_work();
        assert!(matches!(
            started.ledger_error,
            Some(PersistenceError::Unavailable(_))
        ));
        assert!(matches!(started.event, Some(Event::WorkStarted { durable: false, .. })));
        assert_eq!(engine.status(), EngineStatus::Working);
        assert_eq!(engine.session_id(), Some(1_700_000_000_000));

        clock.advance(HOUR_MS);
        engine.check_time();
        let settled = engine.complete_settlement("Meeting");
        assert!(settled.ledger_error.is_some());
        assert!(matches!(
            settled.event,
            Some(Event::SettlementCompleted { chunk_id: None, .. })
        ));
        assert_eq!(engine.total_assets(), 350);
        assert!(ledger.list_hour_chunks().unwrap().is_empty());
    }

    #[test]
    fn scenario_d_stop_closes_session() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.add_assets(1_000);
        engine.start_work();
        let id = engine.session_id().unwrap();

        clock.set(90_000);
        let stopped = engine.stop_work();
        assert!(matches!(
            stopped.event,
            Some(Event::WorkStopped { worked_ms: 90_000, .. })
        ));
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.start_time(), None);
        assert_eq!(engine.last_settled_time(), None);
        assert_eq!(engine.session_id(), None);
        assert_eq!(engine.total_assets(), 1_000);
        assert_eq!(ledger.get_session(id).unwrap().unwrap().end_time, Some(90_000));
    }

    #[test]
    fn stop_with_failing_ledger_still_goes_idle() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();

        ledger.set_unavailable(true);
        let stopped = engine.stop_work();
        assert!(stopped.ledger_error.is_some());
        assert_eq!(engine.status(), EngineStatus::Idle);
    }

    #[test]
    fn stop_skips_ledger_for_fallback_session() {
        let ledger = MemoryLedger::unavailable();
        let clock = ManualClock::new(5);
        let mut engine = engine(&ledger, &clock);
        let _ = engine.start_work();

        ledger.set_unavailable(false);
        let stopped = engine.stop_work();
        assert!(stopped.ledger_error.is_none());
        assert!(ledger.list_sessions().unwrap().is_empty());
    }

    #[test]
    fn check_time_before_unit_is_noop() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();
        let before = engine.state().clone();

        clock.set(HOUR_MS - 1);
        assert!(engine.check_time().is_none());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn check_time_only_fires_once() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();

        clock.set(HOUR_MS);
        assert!(engine.check_time().is_some());
        clock.set(5 * HOUR_MS);
        assert!(engine.check_time().is_none());
        assert_eq!(engine.unclaimed_hours(), 1);
    }

    #[test]
    fn idle_engine_ignores_time_and_claims() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(10 * HOUR_MS);
        let mut engine = engine(&ledger, &clock);

        assert!(engine.check_time().is_none());
        assert!(!engine.complete_settlement("Code").is_applied());
        assert!(engine.trigger_settlement().is_none());
        assert!(!engine.stop_work().is_applied());
        assert_eq!(engine.status(), EngineStatus::Idle);
    }

    #[test]
    fn blank_tag_is_ignored() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();
        clock.set(HOUR_MS);
        engine.check_time();

        assert!(!engine.complete_settlement("   ").is_applied());
        assert_eq!(engine.status(), EngineStatus::Settlement);
        assert_eq!(engine.total_assets(), 0);
    }

    #[test]
    fn start_is_ignored_while_tracking() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();
        assert!(!engine.start_work().is_applied());
        assert_eq!(ledger.list_sessions().unwrap().len(), 1);
    }

    #[test]
    fn forced_settlement_claims_one_unit() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();

        clock.set(60_000);
        let forced = engine.trigger_settlement();
        assert!(matches!(forced, Some(Event::SettlementForced { unclaimed_hours: 1, .. })));
        assert_eq!(engine.status(), EngineStatus::Settlement);

        engine.complete_settlement("Plan");
        assert_eq!(engine.status(), EngineStatus::Working);
        assert_eq!(engine.total_assets(), 350);
        assert_eq!(engine.last_settled_time(), Some(HOUR_MS));
    }

    #[test]
    fn forced_settlement_keeps_pending_count() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();
        clock.set(2 * HOUR_MS);
        engine.check_time();

        let forced = engine.trigger_settlement();
        assert!(matches!(forced, Some(Event::SettlementForced { unclaimed_hours: 2, .. })));
        assert_eq!(engine.unclaimed_hours(), 2);
    }

    #[test]
    fn work_restart_keeps_assets() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();
        clock.set(HOUR_MS);
        engine.check_time();
        engine.complete_settlement("Code");
        engine.stop_work();

        clock.advance(1_000);
        engine.start_work();
        assert_eq!(engine.total_assets(), 350);
        assert_eq!(engine.last_settled_time(), Some(HOUR_MS + 1_000));
        assert_eq!(ledger.list_sessions().unwrap().len(), 2);
    }

    #[test]
    fn snapshot_reports_time_to_next_unit() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);

        match engine.snapshot() {
            Event::StateSnapshot {
                status,
                next_unit_in_ms,
                hourly_rate,
                ..
            } => {
                assert_eq!(status, EngineStatus::Idle);
                assert_eq!(next_unit_in_ms, None);
                assert_eq!(hourly_rate, 350);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }

        engine.start_work();
        clock.set(HOUR_MS - 10_000);
        match engine.snapshot() {
            Event::StateSnapshot {
                next_unit_in_ms, ..
            } => assert_eq!(next_unit_in_ms, Some(10_000)),
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn restore_roundtrips_through_json() {
        let ledger = MemoryLedger::new();
        let clock = ManualClock::new(0);
        let mut engine = engine(&ledger, &clock);
        engine.start_work();
        engine.add_assets(50);

        let json = serde_json::to_string(engine.state()).unwrap();
        let state: EngineState = serde_json::from_str(&json).unwrap();
        let restored = SessionEngine::restore(state, settings(), &ledger, clock.clone()).unwrap();

        assert_eq!(restored.status(), EngineStatus::Working);
        assert_eq!(restored.session_id(), engine.session_id());
        assert_eq!(restored.total_assets(), 50);
    }

    #[test]
    fn restore_applies_configured_rate() {
        let ledger = MemoryLedger::new();
        let state = EngineState::idle(100);
        let restored =
            SessionEngine::restore(state, settings(), &ledger, ManualClock::new(0)).unwrap();
        assert_eq!(restored.hourly_rate(), 350);
    }

    #[test]
    fn restore_resets_inconsistent_state() {
        let ledger = MemoryLedger::new();
        let state = EngineState {
            status: EngineStatus::Working,
            total_assets: 700,
            ..EngineState::default()
        };
        let restored =
            SessionEngine::restore(state, settings(), &ledger, ManualClock::new(0)).unwrap();
        assert_eq!(restored.status(), EngineStatus::Idle);
        assert_eq!(restored.total_assets(), 700);
    }
}
