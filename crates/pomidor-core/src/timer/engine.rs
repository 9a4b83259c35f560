//! Work/rest cycle engine.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or read the wall clock - the caller is responsible for calling
//! `tick(delta)` periodically with the elapsed time since the previous tick.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> WorkRunning <-> WorkPaused
//!              |  ^
//!              v  |        (completion auto-switches phase)
//!         RestRunning <-> RestPaused
//! ```
//!
//! Every control input is valid in every state; inputs that do not apply to
//! the current state are silent no-ops, so the machine is total.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use pomidor_core::{Durations, PomodoroEngine};
//!
//! let durations = Durations::new(
//!     Duration::from_secs(25 * 60),
//!     Duration::from_secs(5 * 60),
//! ).unwrap();
//! let mut engine = PomodoroEngine::new(durations);
//! engine.play();
//! // In a loop, at a fixed cadence:
//! engine.tick(Duration::from_secs(1));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::phase::{Phase, PhaseTimer};
use crate::error::ConfigError;
use crate::events::{Notification, Snapshot};
use crate::observer::PomodoroObserver;

/// Whether the active phase's countdown is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
}

/// Validated phase lengths, fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    work: Duration,
    rest: Duration,
}

impl Durations {
    /// Validate phase lengths. A zero duration is a configuration error:
    /// fatal at construction, never checked again at runtime.
    pub fn new(work: Duration, rest: Duration) -> Result<Self, ConfigError> {
        if work.is_zero() {
            return Err(ConfigError::InvalidDuration { field: "work" });
        }
        if rest.is_zero() {
            return Err(ConfigError::InvalidDuration { field: "rest" });
        }
        Ok(Self { work, rest })
    }

    /// The classic 25/5 cycle.
    pub fn classic() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            rest: Duration::from_secs(5 * 60),
        }
    }

    pub fn work(&self) -> Duration {
        self.work
    }

    pub fn rest(&self) -> Duration {
        self.rest
    }

    fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::Rest => self.rest,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::classic()
    }
}

/// Core work/rest state machine.
///
/// Owns exactly one [`PhaseTimer`], one [`Phase`], and one [`RunState`];
/// nothing else mutates them. Observers receive copies of derived values
/// via notifications, delivered synchronously in subscription order on the
/// calling thread.
pub struct PomodoroEngine {
    durations: Durations,
    phase: Phase,
    run_state: RunState,
    timer: PhaseTimer,
    observers: Vec<Box<dyn PomodoroObserver>>,
}

impl PomodoroEngine {
    /// Create an idle engine. `durations` are already validated by
    /// [`Durations::new`].
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            phase: Phase::Work,
            run_state: RunState::Idle,
            timer: PhaseTimer::start(durations.work()),
            observers: Vec::new(),
        }
    }

    /// Register an observer. Notifications are delivered in subscription
    /// order.
    pub fn subscribe(&mut self, observer: Box<dyn PomodoroObserver>) {
        self.observers.push(observer);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn percent(&self) -> u8 {
        self.timer.percent()
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Build a state snapshot (copies only, no references into the session).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            run_state: self.run_state,
            percent: self.timer.percent(),
            remaining_ms: self.timer.remaining().as_millis() as u64,
            total_ms: self.timer.total().as_millis() as u64,
        }
    }

    // ── Controls ─────────────────────────────────────────────────────

    /// Start from idle (defaulting to the work phase) or resume a paused
    /// phase. Resuming continues the same phase's elapsed time; it never
    /// restarts the timer.
    pub fn play(&mut self) {
        match self.run_state {
            RunState::Idle => self.start_phase(Phase::Work),
            RunState::Paused => {
                log::debug!("resumed {:?} at {}%", self.phase, self.timer.percent());
                self.run_state = RunState::Running;
                self.emit(Notification::Resumed);
            }
            RunState::Running => {}
        }
    }

    /// Freeze the countdown. No-op unless running; a second `pause` emits
    /// nothing.
    pub fn pause(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        log::debug!("paused {:?} at {}%", self.phase, self.timer.percent());
        self.run_state = RunState::Paused;
        self.emit(Notification::Paused);
    }

    /// Cancel the current phase unconditionally and return to idle.
    ///
    /// Emits nothing: a phase cancelled this way never delivers a trailing
    /// completion notification.
    pub fn reset(&mut self) {
        log::debug!("reset from {:?}/{:?}", self.phase, self.run_state);
        self.phase = Phase::Work;
        self.run_state = RunState::Idle;
        self.timer = PhaseTimer::start(self.durations.work());
    }

    /// Switch to the work phase, restarting its timer from zero.
    ///
    /// Switching is always a restart, even when work is already the active
    /// phase - that is what distinguishes it from [`play`].
    ///
    /// [`play`]: PomodoroEngine::play
    pub fn go_to_work(&mut self) {
        self.start_phase(Phase::Work);
    }

    /// Switch to the rest phase, restarting its timer from zero.
    pub fn take_a_break(&mut self) {
        self.start_phase(Phase::Rest);
    }

    /// Advance the active phase by `delta`.
    ///
    /// Emits the phase's percent and time-left notifications with the
    /// updated values; if the phase is now complete, emits its completion
    /// notification and auto-starts the opposite phase. Ticks while paused
    /// or idle are no-ops.
    pub fn tick(&mut self, delta: Duration) {
        if self.run_state != RunState::Running {
            return;
        }
        self.timer.advance(delta);
        log::trace!(
            "tick {:?}: {}% ({:?} left)",
            self.phase,
            self.timer.percent(),
            self.timer.remaining()
        );

        let percent = self.timer.percent();
        let remaining_ms = self.timer.remaining().as_millis() as u64;
        match self.phase {
            Phase::Work => {
                self.emit(Notification::WorkPercent { percent });
                self.emit(Notification::WorkTimeLeft { remaining_ms });
            }
            Phase::Rest => {
                self.emit(Notification::RestPercent { percent });
                self.emit(Notification::RestTimeLeft { remaining_ms });
            }
        }

        if self.timer.is_complete() {
            log::debug!("{:?} complete", self.phase);
            self.emit(match self.phase {
                Phase::Work => Notification::WorkComplete,
                Phase::Rest => Notification::RestComplete,
            });
            self.start_phase(self.phase.other());
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn start_phase(&mut self, phase: Phase) {
        log::debug!("starting {:?} ({:?})", phase, self.durations.for_phase(phase));
        self.phase = phase;
        self.timer = PhaseTimer::start(self.durations.for_phase(phase));
        self.run_state = RunState::Running;
        self.emit(match phase {
            Phase::Work => Notification::WorkStarted,
            Phase::Rest => Notification::RestStarted,
        });
    }

    fn emit(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer.notify(&notification);
        }
    }
}
